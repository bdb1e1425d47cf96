use std::collections::BTreeMap;

/// Path of the local air-data API served by every sensor.
pub const AIR_DATA_PATH: &str = "/air-data/latest";

const SPEC_DELIMITER: char = '=';

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeviceSpecError {
    #[error("expected name=address, got {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub address: String,
}

impl Device {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Splits on the last `=`, so the name never swallows part of the address.
    pub fn parse(token: &str) -> Result<Self, DeviceSpecError> {
        let (name, address) = token
            .rsplit_once(SPEC_DELIMITER)
            .ok_or_else(|| DeviceSpecError::Malformed(token.to_string()))?;
        Ok(Self::new(name, address))
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.address, AIR_DATA_PATH)
    }
}

/// Immutable name -> address mapping built once at startup.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: BTreeMap<String, Device>,
}

impl DeviceRegistry {
    /// Parses `name=address` tokens. A repeated name replaces the earlier entry.
    pub fn parse<I, S>(tokens: I) -> Result<Self, DeviceSpecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut devices = BTreeMap::new();
        for token in tokens {
            let device = Device::parse(token.as_ref())?;
            devices.insert(device.name.clone(), device);
        }
        Ok(Self { devices })
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Device> {
        self.devices.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}

impl FromIterator<Device> for DeviceRegistry {
    fn from_iter<T: IntoIterator<Item = Device>>(iter: T) -> Self {
        let devices = iter
            .into_iter()
            .map(|device| (device.name.clone(), device))
            .collect();
        Self { devices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unique_names_keeps_every_device() {
        let registry = DeviceRegistry::parse([
            "office=10.0.0.10:80",
            "bedroom=10.0.0.11:80",
            "kitchen=awair-kitchen.lan:8080",
        ])
        .expect("parse");

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("office").unwrap().address, "10.0.0.10:80");
        assert_eq!(registry.get("bedroom").unwrap().address, "10.0.0.11:80");
        assert_eq!(
            registry.get("kitchen").unwrap().address,
            "awair-kitchen.lan:8080"
        );
    }

    #[test]
    fn parse_splits_on_last_delimiter() {
        let device = Device::parse("a=b=c").expect("parse");
        assert_eq!(device.name, "a=b");
        assert_eq!(device.address, "c");
    }

    #[test]
    fn parse_rejects_token_without_delimiter() {
        let err = DeviceRegistry::parse(["office=10.0.0.10", "bedroom"]).unwrap_err();
        assert_eq!(err, DeviceSpecError::Malformed("bedroom".to_string()));
        assert!(err.to_string().contains("\"bedroom\""));
    }

    #[test]
    fn parse_later_duplicate_wins() {
        let registry =
            DeviceRegistry::parse(["office=10.0.0.10:80", "office=10.0.0.99:80"]).expect("parse");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("office").unwrap().address, "10.0.0.99:80");
    }

    #[test]
    fn parse_allows_empty_parts() {
        let device = Device::parse("=10.0.0.10").expect("parse");
        assert_eq!(device.name, "");
        assert_eq!(device.address, "10.0.0.10");
    }

    #[test]
    fn endpoint_uses_air_data_path() {
        let device = Device::new("office", "10.0.0.10:80");
        assert_eq!(device.endpoint(), "http://10.0.0.10:80/air-data/latest");
    }

    #[test]
    fn empty_token_list_yields_empty_registry() {
        let registry = DeviceRegistry::parse(Vec::<String>::new()).expect("parse");
        assert!(registry.is_empty());
    }
}
