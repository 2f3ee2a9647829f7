//! Builders for planner entities.

use std::collections::HashMap;

use chrono::{NaiveTime, TimeDelta};

use roster_planner::itinerary::Itinerary;
use roster_planner::model::{Availability, Driver, Location, Route, TimeWindow, Vehicle};

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Builder for test drivers: available, at the origin, no capabilities, 24h.
#[derive(Clone, Debug)]
pub struct TestDriver(Driver);

pub fn driver(name: &str) -> TestDriver {
    TestDriver(Driver::new(name, Location::new(0.0, 0.0)))
}

impl TestDriver {
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.0.location = Location::new(lat, lon);
        self
    }

    pub fn capability(mut self, tag: &str) -> Self {
        self.0.capabilities.push(tag.to_string());
        self
    }

    pub fn max_hours(mut self, hours: f64) -> Self {
        self.0.max_work = TimeDelta::minutes((hours * 60.0).round() as i64);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.0.availability = Availability::Unavailable;
        self
    }

    pub fn build(self) -> Driver {
        self.0
    }
}

/// Builder for test vehicles: available, no fuel efficiency.
#[derive(Clone, Debug)]
pub struct TestVehicle(Vehicle);

pub fn vehicle(id: &str, kind: &str) -> TestVehicle {
    TestVehicle(Vehicle::new(id, kind))
}

impl TestVehicle {
    pub fn efficiency(mut self, efficiency: f64) -> Self {
        self.0.fuel_efficiency = Some(efficiency);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.0.availability = Availability::Unavailable;
        self
    }

    pub fn build(self) -> Vehicle {
        self.0
    }
}

/// Builder for test routes: 08:00 for 60 minutes, origin to origin.
#[derive(Clone, Debug)]
pub struct TestRoute {
    id: String,
    origin: Location,
    destination: Location,
    start: NaiveTime,
    minutes: i64,
    required_type: String,
}

pub fn route(id: &str) -> TestRoute {
    TestRoute {
        id: id.to_string(),
        origin: Location::new(0.0, 0.0),
        destination: Location::new(0.0, 0.0),
        start: time(8, 0),
        minutes: 60,
        required_type: "simple".to_string(),
    }
}

impl TestRoute {
    pub fn from(mut self, lat: f64, lon: f64) -> Self {
        self.origin = Location::new(lat, lon);
        self
    }

    pub fn to(mut self, lat: f64, lon: f64) -> Self {
        self.destination = Location::new(lat, lon);
        self
    }

    pub fn starts(mut self, hour: u32, minute: u32) -> Self {
        self.start = time(hour, minute);
        self
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn requires(mut self, tag: &str) -> Self {
        self.required_type = tag.to_string();
        self
    }

    pub fn build(self) -> Route {
        Route::new(
            self.id,
            self.origin,
            self.destination,
            self.start,
            TimeDelta::minutes(self.minutes),
            self.required_type,
        )
    }
}

/// Two drivers, two vehicles and two routes of the `simple` type.
///
/// - Driver A at (0,0), driver B at (10,10), both limited to 8 hours
/// - Vehicles 101 and 102, efficiency 10
/// - L1 (0,0)->(5,5) 08:00-09:00, L2 (10,10)->(15,15) 10:00-11:00
pub fn base_data() -> (Vec<Driver>, Vec<Vehicle>, Vec<Route>) {
    let drivers = vec![
        driver("A").at(0.0, 0.0).capability("simple").max_hours(8.0).build(),
        driver("B").at(10.0, 10.0).capability("simple").max_hours(8.0).build(),
    ];
    let vehicles = vec![
        vehicle("101", "simple").efficiency(10.0).build(),
        vehicle("102", "simple").efficiency(10.0).build(),
    ];
    let routes = vec![
        route("L1").from(0.0, 0.0).to(5.0, 5.0).starts(8, 0).build(),
        route("L2").from(10.0, 10.0).to(15.0, 15.0).starts(10, 0).build(),
    ];
    (drivers, vehicles, routes)
}

/// Itineraries with one committed stop per entry.
pub fn seeded(stops: &[(&str, &str, TimeWindow, Location)]) -> HashMap<String, Itinerary> {
    let mut itineraries: HashMap<String, Itinerary> = HashMap::new();
    for (driver, route_id, window, destination) in stops {
        itineraries
            .entry(driver.to_string())
            .or_default()
            .push(*route_id, *window, *destination);
    }
    itineraries
}
