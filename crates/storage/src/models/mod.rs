mod athlete;
mod athlete_name;
mod gender;
mod meet;
mod race;
mod race_result;
mod venue;

pub use athlete::Athlete;
pub use athlete_name::AthleteName;
pub use gender::Gender;
pub use meet::Meet;
pub use race::Race;
pub use race_result::RaceResult;
pub use venue::Venue;
