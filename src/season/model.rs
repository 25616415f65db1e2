use serde::Serialize;

/// A car as listed for a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Car {
    pub id: i64,
    pub name: String,
}

/// A series with statistics on the members site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub series_id: i64,
    pub name: String,
    pub category_id: i64,
    pub cars: Vec<Car>,
}

impl Series {
    pub fn car_names(&self) -> Vec<&str> {
        self.cars.iter().map(|c| c.name.as_str()).collect()
    }
}
