use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    Audit, CommonProperties, Record,
    object::ObjectKind,
    properties::{Description, Name, TraitKind, TraitRef},
};

/// A geographic location, given by coordinates, by address, or by region.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    pub common: CommonProperties,
    #[serde(flatten)]
    pub name: Name,
    #[serde(flatten)]
    pub description: Description,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Precision of the coordinates, in meters.
    pub precision: Option<f64>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub administrative_area: Option<String>,
    pub city: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
}

impl Location {
    pub fn new() -> Self {
        Self {
            common: CommonProperties::new(Self::KIND.as_str()),
            ..Default::default()
        }
    }

    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = Some(region.into());
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = Some(country.into());
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = Some(city.into());
    }
}

impl Record for Location {
    const KIND: ObjectKind = ObjectKind::Location;
    const TRAITS: &'static [TraitKind] = &[TraitKind::Name, TraitKind::Description];
    const PROPERTIES: &'static [&'static str] = &[
        "latitude",
        "longitude",
        "precision",
        "region",
        "country",
        "administrative_area",
        "city",
        "street_address",
        "postal_code",
    ];

    fn common(&self) -> &CommonProperties {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonProperties {
        &mut self.common
    }

    fn traits(&self) -> Vec<TraitRef<'_>> {
        vec![
            TraitRef::Name(&self.name),
            TraitRef::Description(&self.description),
        ]
    }

    fn check_properties(&self, acc: &mut Audit) {
        let has_coordinates = self.latitude.is_some() && self.longitude.is_some();
        acc.check(
            "region",
            self.region.is_some() || self.country.is_some() || has_coordinates,
            "has a region, country or coordinates",
            "one of region, country or latitude and longitude is required",
        );
        acc.check(
            "longitude",
            self.latitude.is_some() == self.longitude.is_some(),
            "latitude and longitude are set together",
            "latitude and longitude must be set together",
        );
        if let Some(latitude) = self.latitude {
            acc.check(
                "latitude",
                (-90.0..=90.0).contains(&latitude),
                "in -90..=90",
                format!("{latitude} is not in -90..=90"),
            );
        }
        if let Some(longitude) = self.longitude {
            acc.check(
                "longitude",
                (-180.0..=180.0).contains(&longitude),
                "in -180..=180",
                format!("{longitude} is not in -180..=180"),
            );
        }
        if self.precision.is_some() {
            acc.check(
                "precision",
                has_coordinates,
                "coordinates are set",
                "precision needs latitude and longitude",
            );
        }
    }

    fn compare_properties(&self, other: &Self, acc: &mut Audit) {
        acc.compare_value("latitude", &self.latitude, &other.latitude);
        acc.compare_value("longitude", &self.longitude, &other.longitude);
        acc.compare_value("precision", &self.precision, &other.precision);
        acc.compare_value("region", &self.region, &other.region);
        acc.compare_value("country", &self.country, &other.country);
        acc.compare_value(
            "administrative_area",
            &self.administrative_area,
            &other.administrative_area,
        );
        acc.compare_value("city", &self.city, &other.city);
        acc.compare_value("street_address", &self.street_address, &other.street_address);
        acc.compare_value("postal_code", &self.postal_code, &other.postal_code);
    }
}
