use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Accesspoint {
    pub name: String,
    pub mac: Option<String>,
    pub snmp_location: Option<String>,
    pub client_count: u32,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Accesspoints {
    pub accesspoints: Vec<Accesspoint>,
}

impl Accesspoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.accesspoints.is_empty()
    }
}

impl fmt::Display for Accesspoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "  mac: {}", self.mac.as_deref().unwrap_or("-"))?;
        writeln!(
            f,
            "  location: {}",
            self.snmp_location.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "  clients: {}", self.client_count)?;
        writeln!(f, "  coordinates: {}, {}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Accesspoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} accesspoints", self.accesspoints.len())?;
        for accesspoint in &self.accesspoints {
            write!(f, "{}", accesspoint)?;
        }
        Ok(())
    }
}
