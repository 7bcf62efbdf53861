use covidgen_core::{Column, FieldValue, Record, RecordKind, Result, TableName};

/// Accumulates validated records for one table, assigning sequential
/// identifiers starting at 1.
#[derive(Debug)]
pub struct TableBuilder {
    table: TableName,
    next_id: u64,
    records: Vec<Record>,
}

impl TableBuilder {
    pub fn new(table: TableName) -> Self {
        Self {
            table,
            next_id: 1,
            records: Vec::new(),
        }
    }

    pub fn table(&self) -> TableName {
        self.table
    }

    /// Identifier the next composed record will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a record from the next identifier, validate it and append it.
    ///
    /// The identifier only advances when the record is accepted.
    pub fn compose<K, F>(&mut self, build: F) -> Result<&Record>
    where
        K: Into<RecordKind>,
        F: FnOnce(u64) -> K,
    {
        let record = Record::new(build(self.next_id))?;
        self.next_id += 1;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn finish(self) -> Dataset {
        Dataset {
            table: self.table,
            records: self.records,
        }
    }
}

/// A finished table: name, declared column order and validated rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    table: TableName,
    records: Vec<Record>,
}

impl Dataset {
    pub fn table(&self) -> TableName {
        self.table
    }

    pub fn columns(&self) -> &'static [Column] {
        self.table.columns()
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.table.column_names()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cells of every row in declared column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<FieldValue>> + '_ {
        self.records.iter().map(Record::values)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use covidgen_core::records::MobilityRecord;
    use covidgen_core::{Error, Region};

    use super::*;

    fn steady_week(id: u64) -> MobilityRecord {
        let mut record = MobilityRecord {
            id_mobilitas: id,
            iso_code: Region::Bali,
            tanggal: NaiveDate::from_ymd_opt(2022, 3, 6).unwrap(),
            retail_recreation: -5.0,
            grocery_pharmacy: 0.0,
            parks: -5.0,
            transit_stations: -5.0,
            workplaces: -5.0,
            residential: 1.0,
            private_vehicle_movement: -3.0,
            public_transport_usage: -7.0,
            walking_cycling: -2.0,
            morning_rush_hour: -4.0,
            afternoon_activity: -4.0,
            evening_rush_hour: -4.0,
            night_activity: -6.0,
            overall_mobility_index: 0.0,
        };
        record.overall_mobility_index = covidgen_core::records::overall_index(&record.channels());
        record
    }

    #[test]
    fn identifiers_are_sequential_from_one() {
        let mut builder = TableBuilder::new(TableName::MobilitasHarian);
        for _ in 0..3 {
            builder.compose(steady_week).unwrap();
        }
        let dataset = builder.finish();
        let ids: Vec<u64> = dataset.records().iter().map(Record::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(dataset.rows().count(), 3);
        assert_eq!(dataset.column_names()[0], "id_mobilitas");
    }

    #[test]
    fn rejected_record_does_not_consume_an_identifier() {
        let mut builder = TableBuilder::new(TableName::MobilitasHarian);
        let err = builder
            .compose(|id| {
                let mut record = steady_week(id);
                record.overall_mobility_index = 50.0;
                record
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvariantViolation { id: 1, .. }));
        assert_eq!(builder.next_id(), 1);
        assert!(builder.is_empty());
    }
}
