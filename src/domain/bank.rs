use crate::domain::client::Client;
use serde::{Deserialize, Serialize};

/// A bank with the snapshot of its clients taken when the record was written.
///
/// Bank records are reference data: they are seeded once and read back
/// through `query`. No operation updates them, so `client_list` may lag
/// behind the client records themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(rename = "IDBank")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "EstablishmentYear")]
    pub establishment_year: i32,
    #[serde(rename = "OriginCountry")]
    pub origin_country: String,
    #[serde(rename = "BusinessCountries", default)]
    pub business_countries: Vec<String>,
    #[serde(rename = "ClientList", default)]
    pub client_list: Vec<Client>,
}
