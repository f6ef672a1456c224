/// Arrow schema for the per-vehicle coverage table.
pub mod vehicles {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, BooleanArray, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;

    use crate::VehicleRecord;

    /// One row per vehicle; empty strings mean "not printed".
    pub fn vehicle_schema() -> Schema {
        Schema::new(vec![
            Field::new("model", DataType::Utf8, false),
            Field::new("vin", DataType::Utf8, false),
            Field::new("collision", DataType::Boolean, false),
            Field::new("collision_deductible", DataType::Utf8, false),
            Field::new("comprehensive", DataType::Boolean, false),
            Field::new("comprehensive_deductible", DataType::Utf8, false),
            Field::new("rental", DataType::Boolean, false),
            Field::new("rental_limit", DataType::Utf8, false),
            Field::new("roadside", DataType::Boolean, false),
        ])
    }

    /// Build a [`RecordBatch`] of vehicle rows in record order.
    pub fn vehicles_batch(vehicles: &[VehicleRecord]) -> Result<RecordBatch, ArrowError> {
        let strings = |f: fn(&VehicleRecord) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(vehicles.iter().map(f)))
        };
        let flags = |f: fn(&VehicleRecord) -> bool| -> ArrayRef {
            Arc::new(BooleanArray::from(vehicles.iter().map(f).collect::<Vec<_>>()))
        };

        RecordBatch::try_new(
            Arc::new(vehicle_schema()),
            vec![
                strings(|v| &v.model),
                strings(|v| &v.vin),
                flags(|v| v.collision.selected),
                strings(|v| &v.collision.deductible),
                flags(|v| v.comprehensive.selected),
                strings(|v| &v.comprehensive.deductible),
                flags(|v| v.rental.selected),
                strings(|v| &v.rental.limit),
                flags(|v| v.roadside.selected),
            ],
        )
    }
}
