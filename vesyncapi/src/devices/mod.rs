//! Known VeSync device models and the device category each belongs to.
//!
//! Only the lookup lives here; controlling a device is up to the caller.

use crate::error::{Result, VeSyncError};

/// Category under which the cloud groups devices.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DeviceCategory {
    Outlets,
    Switches,
    Fans,
    Bulbs,
}

impl std::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceCategory::Outlets => write!(f, "outlets"),
            DeviceCategory::Switches => write!(f, "switches"),
            DeviceCategory::Fans => write!(f, "fans"),
            DeviceCategory::Bulbs => write!(f, "bulbs"),
        }
    }
}

impl std::str::FromStr for DeviceCategory {
    type Err = VeSyncError;

    fn from_str(input: &str) -> Result<Self> {
        match input.to_lowercase().as_str() {
            "outlets" | "outlet" | "plug" | "plugs" => Ok(DeviceCategory::Outlets),
            "switches" | "switch" => Ok(DeviceCategory::Switches),
            "fans" | "fan" | "purifier" | "humidifier" => Ok(DeviceCategory::Fans),
            "bulbs" | "bulb" | "light" | "lights" => Ok(DeviceCategory::Bulbs),
            _ => Err(VeSyncError::ParserError(format!(
                "cannot convert {:?} to DeviceCategory",
                input
            ))),
        }
    }
}

/// The kind of driver a model needs. Several models share one.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DeviceClass {
    Outlet7A,
    Outlet10A,
    Outlet15A,
    OutdoorPlug,
    WallSwitch,
    DimmerSwitch,
    Air131,
    Humidifier300S,
    BulbESL100,
    BulbESL100CW,
}

impl DeviceClass {
    pub fn category(&self) -> DeviceCategory {
        match self {
            DeviceClass::Outlet7A
            | DeviceClass::Outlet10A
            | DeviceClass::Outlet15A
            | DeviceClass::OutdoorPlug => DeviceCategory::Outlets,
            DeviceClass::WallSwitch | DeviceClass::DimmerSwitch => DeviceCategory::Switches,
            DeviceClass::Air131 | DeviceClass::Humidifier300S => DeviceCategory::Fans,
            DeviceClass::BulbESL100 | DeviceClass::BulbESL100CW => DeviceCategory::Bulbs,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DeviceModel {
    WifiSwitch13,
    ESW03USA,
    ESW01EU,
    ESW15USA,
    ESWL01,
    ESWL03,
    LVPUR131S,
    ESO15TB,
    ESL100,
    ESL100CW,
    ESWD16,
    Classic300S,
}

impl DeviceModel {
    pub const ALL: [DeviceModel; 12] = [
        DeviceModel::WifiSwitch13,
        DeviceModel::ESW03USA,
        DeviceModel::ESW01EU,
        DeviceModel::ESW15USA,
        DeviceModel::ESWL01,
        DeviceModel::ESWL03,
        DeviceModel::LVPUR131S,
        DeviceModel::ESO15TB,
        DeviceModel::ESL100,
        DeviceModel::ESL100CW,
        DeviceModel::ESWD16,
        DeviceModel::Classic300S,
    ];

    /// The model string the cloud reports in device lists.
    pub fn model(&self) -> &'static str {
        match self {
            DeviceModel::WifiSwitch13 => "wifi-switch-1.3",
            DeviceModel::ESW03USA => "ESW03-USA",
            DeviceModel::ESW01EU => "ESW01-EU",
            DeviceModel::ESW15USA => "ESW15-USA",
            DeviceModel::ESWL01 => "ESWL01",
            DeviceModel::ESWL03 => "ESWL03",
            DeviceModel::LVPUR131S => "LV-PUR131S",
            DeviceModel::ESO15TB => "ESO15-TB",
            DeviceModel::ESL100 => "ESL100",
            DeviceModel::ESL100CW => "ESL100CW",
            DeviceModel::ESWD16 => "ESWD16",
            DeviceModel::Classic300S => "Classic300S",
        }
    }

    pub fn class(&self) -> DeviceClass {
        match self {
            DeviceModel::WifiSwitch13 => DeviceClass::Outlet7A,
            DeviceModel::ESW03USA | DeviceModel::ESW01EU => DeviceClass::Outlet10A,
            DeviceModel::ESW15USA => DeviceClass::Outlet15A,
            DeviceModel::ESO15TB => DeviceClass::OutdoorPlug,
            DeviceModel::ESWL01 | DeviceModel::ESWL03 => DeviceClass::WallSwitch,
            DeviceModel::ESWD16 => DeviceClass::DimmerSwitch,
            DeviceModel::LVPUR131S => DeviceClass::Air131,
            DeviceModel::Classic300S => DeviceClass::Humidifier300S,
            DeviceModel::ESL100 => DeviceClass::BulbESL100,
            DeviceModel::ESL100CW => DeviceClass::BulbESL100CW,
        }
    }

    pub fn category(&self) -> DeviceCategory {
        self.class().category()
    }

    /// All models of one category.
    pub fn in_category(category: DeviceCategory) -> impl Iterator<Item = DeviceModel> {
        DeviceModel::ALL
            .into_iter()
            .filter(move |model| model.category() == category)
    }
}

impl std::fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.model())
    }
}

impl std::str::FromStr for DeviceModel {
    type Err = VeSyncError;

    fn from_str(input: &str) -> Result<Self> {
        DeviceModel::ALL
            .into_iter()
            .find(|model| model.model() == input)
            .ok_or_else(|| VeSyncError::UnknownDevice(input.to_string()))
    }
}
