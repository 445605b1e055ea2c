use crate::domain::LocationSample;

#[derive(Debug)]
pub enum Event {
    LocationSampled(LocationSample),
    StoreCurrentLocation,
    CalculateDistance,
    ResetOrigin,
}
