use crate::store::Session;

/// The text lines shown next to the camera view.
#[derive(Clone, PartialEq, Debug)]
pub struct Readout {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub altitude: Option<String>,
    pub distance: Option<String>,
    pub status: String,
}

impl Readout {
    pub fn from_session(session: &Session) -> Self {
        let current = session.current;
        Readout {
            latitude: current.map(|c| format!("Latitude: {:.6}°", c.latitude)),
            longitude: current.map(|c| format!("Longitude: {:.6}°", c.longitude)),
            altitude: current.map(|c| format!("Altitude: {:.1}m", c.altitude)),
            distance: session.distance_m.map(|d| format!("Distance: {:.2} meters", d)),
            status: session.status_text.clone(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        [&self.latitude, &self.longitude, &self.altitude, &self.distance]
            .into_iter()
            .filter_map(|line| line.as_deref())
            .chain(std::iter::once(self.status.as_str()))
    }
}
