//! The five Manhattan records from the demo dataset, verbatim, plus a
//! record builder with sensible defaults.

use restroom_router::model::{Coordinate, RestroomRecord};

pub const TIMES_SQUARE: Coordinate = Coordinate::new(40.7580, -73.9855);
pub const EMPIRE_STATE: Coordinate = Coordinate::new(40.7484, -73.9857);

/// Builder for test records. Defaults: open, free, not accessible, no
/// changing table, no rating, at (0, 0).
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: RestroomRecord,
}

impl RecordBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            record: RestroomRecord {
                id: id.to_string(),
                name: name.to_string(),
                address: String::new(),
                location: Coordinate::new(0.0, 0.0),
                is_open: true,
                is_free: true,
                is_accessible: false,
                has_changing_table: false,
                rating: None,
                hours: None,
                distance: None,
            },
        }
    }

    pub fn address(mut self, address: &str) -> Self {
        self.record.address = address.to_string();
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.record.location = Coordinate::new(latitude, longitude);
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.record.rating = Some(rating);
        self
    }

    pub fn open(mut self, is_open: bool) -> Self {
        self.record.is_open = is_open;
        self
    }

    pub fn free(mut self, is_free: bool) -> Self {
        self.record.is_free = is_free;
        self
    }

    pub fn accessible(mut self, is_accessible: bool) -> Self {
        self.record.is_accessible = is_accessible;
        self
    }

    pub fn changing_table(mut self, has_changing_table: bool) -> Self {
        self.record.has_changing_table = has_changing_table;
        self
    }

    pub fn hours(mut self, hours: &str) -> Self {
        self.record.hours = Some(hours.to_string());
        self
    }

    pub fn build(self) -> RestroomRecord {
        self.record
    }
}

/// The five New York mock records, in their original order.
pub fn new_york_records() -> Vec<RestroomRecord> {
    vec![
        RecordBuilder::new("1", "Central Park Public Restroom")
            .address("Central Park, New York, NY")
            .at(40.7829, -73.9654)
            .accessible(true)
            .changing_table(true)
            .rating(4.2)
            .hours("6:00 AM - 10:00 PM")
            .build(),
        RecordBuilder::new("2", "Times Square McDonald's")
            .address("1500 Broadway, New York, NY")
            .at(40.7580, -73.9855)
            .free(false)
            .accessible(true)
            .changing_table(true)
            .rating(3.8)
            .hours("24/7")
            .build(),
        RecordBuilder::new("3", "Bryant Park Restroom")
            .address("42nd St & 5th Ave, New York, NY")
            .at(40.7536, -73.9832)
            .accessible(true)
            .rating(4.0)
            .hours("7:00 AM - 11:00 PM")
            .build(),
        RecordBuilder::new("4", "Grand Central Terminal")
            .address("89 E 42nd St, New York, NY")
            .at(40.7527, -73.9772)
            .free(false)
            .accessible(true)
            .changing_table(true)
            .rating(4.5)
            .hours("5:30 AM - 2:00 AM")
            .build(),
        RecordBuilder::new("5", "Union Square Park")
            .address("Union Square, New York, NY")
            .at(40.7359, -73.9911)
            .accessible(true)
            .rating(3.9)
            .hours("6:00 AM - 10:00 PM")
            .build(),
    ]
}
