//! Bundled reference locations used for nearby-city suggestions.

use super::GeoPoint;

/// Fixed, European-heavy list of major cities.
pub static CATALOG: &[GeoPoint] = &[
    GeoPoint { name: "London", country: "GB", state: Some("England"), latitude: 51.5074, longitude: -0.1278 },
    GeoPoint { name: "Paris", country: "FR", state: Some("Île-de-France"), latitude: 48.8566, longitude: 2.3522 },
    GeoPoint { name: "Berlin", country: "DE", state: Some("Berlin"), latitude: 52.5200, longitude: 13.4050 },
    GeoPoint { name: "Madrid", country: "ES", state: Some("Community of Madrid"), latitude: 40.4168, longitude: -3.7038 },
    GeoPoint { name: "Rome", country: "IT", state: Some("Lazio"), latitude: 41.9028, longitude: 12.4964 },
    GeoPoint { name: "Amsterdam", country: "NL", state: Some("North Holland"), latitude: 52.3676, longitude: 4.9041 },
    GeoPoint { name: "Brussels", country: "BE", state: Some("Brussels-Capital"), latitude: 50.8503, longitude: 4.3517 },
    GeoPoint { name: "Vienna", country: "AT", state: Some("Vienna"), latitude: 48.2082, longitude: 16.3738 },
    GeoPoint { name: "Prague", country: "CZ", state: Some("Prague"), latitude: 50.0755, longitude: 14.4378 },
    GeoPoint { name: "Warsaw", country: "PL", state: Some("Masovia"), latitude: 52.2297, longitude: 21.0122 },
    GeoPoint { name: "Budapest", country: "HU", state: Some("Budapest"), latitude: 47.4979, longitude: 19.0402 },
    GeoPoint { name: "Lisbon", country: "PT", state: Some("Lisbon"), latitude: 38.7223, longitude: -9.1393 },
    GeoPoint { name: "Dublin", country: "IE", state: Some("Leinster"), latitude: 53.3498, longitude: -6.2603 },
    GeoPoint { name: "Copenhagen", country: "DK", state: Some("Capital Region"), latitude: 55.6761, longitude: 12.5683 },
    GeoPoint { name: "Stockholm", country: "SE", state: Some("Stockholm"), latitude: 59.3293, longitude: 18.0686 },
    GeoPoint { name: "Oslo", country: "NO", state: Some("Oslo"), latitude: 59.9139, longitude: 10.7522 },
    GeoPoint { name: "Helsinki", country: "FI", state: Some("Uusimaa"), latitude: 60.1699, longitude: 24.9384 },
    GeoPoint { name: "Athens", country: "GR", state: Some("Attica"), latitude: 37.9838, longitude: 23.7275 },
    GeoPoint { name: "Zurich", country: "CH", state: Some("Zurich"), latitude: 47.3769, longitude: 8.5417 },
    GeoPoint { name: "Geneva", country: "CH", state: Some("Geneva"), latitude: 46.2044, longitude: 6.1432 },
    GeoPoint { name: "Munich", country: "DE", state: Some("Bavaria"), latitude: 48.1351, longitude: 11.5820 },
    GeoPoint { name: "Hamburg", country: "DE", state: Some("Hamburg"), latitude: 53.5511, longitude: 9.9937 },
    GeoPoint { name: "Frankfurt", country: "DE", state: Some("Hesse"), latitude: 50.1109, longitude: 8.6821 },
    GeoPoint { name: "Cologne", country: "DE", state: Some("North Rhine-Westphalia"), latitude: 50.9375, longitude: 6.9603 },
    GeoPoint { name: "Milan", country: "IT", state: Some("Lombardy"), latitude: 45.4642, longitude: 9.1900 },
    GeoPoint { name: "Barcelona", country: "ES", state: Some("Catalonia"), latitude: 41.3851, longitude: 2.1734 },
    GeoPoint { name: "Lyon", country: "FR", state: Some("Auvergne-Rhône-Alpes"), latitude: 45.7640, longitude: 4.8357 },
    GeoPoint { name: "Marseille", country: "FR", state: Some("Provence-Alpes-Côte d'Azur"), latitude: 43.2965, longitude: 5.3698 },
    GeoPoint { name: "Manchester", country: "GB", state: Some("England"), latitude: 53.4808, longitude: -2.2426 },
    GeoPoint { name: "Birmingham", country: "GB", state: Some("England"), latitude: 52.4862, longitude: -1.8904 },
    GeoPoint { name: "Edinburgh", country: "GB", state: Some("Scotland"), latitude: 55.9533, longitude: -3.1883 },
    GeoPoint { name: "Rotterdam", country: "NL", state: Some("South Holland"), latitude: 51.9244, longitude: 4.4777 },
    GeoPoint { name: "Antwerp", country: "BE", state: Some("Flanders"), latitude: 51.2194, longitude: 4.4025 },
    GeoPoint { name: "Luxembourg", country: "LU", state: None, latitude: 49.6116, longitude: 6.1319 },
    GeoPoint { name: "Krakow", country: "PL", state: Some("Lesser Poland"), latitude: 50.0647, longitude: 19.9450 },
    GeoPoint { name: "Bucharest", country: "RO", state: Some("Bucharest"), latitude: 44.4268, longitude: 26.1025 },
    GeoPoint { name: "Sofia", country: "BG", state: Some("Sofia City"), latitude: 42.6977, longitude: 23.3219 },
    GeoPoint { name: "Belgrade", country: "RS", state: Some("Belgrade"), latitude: 44.7866, longitude: 20.4489 },
    GeoPoint { name: "Zagreb", country: "HR", state: Some("Zagreb"), latitude: 45.8150, longitude: 15.9819 },
    GeoPoint { name: "Istanbul", country: "TR", state: Some("Istanbul"), latitude: 41.0082, longitude: 28.9784 },
    GeoPoint { name: "Kyiv", country: "UA", state: Some("Kyiv"), latitude: 50.4501, longitude: 30.5234 },
    GeoPoint { name: "Reykjavik", country: "IS", state: Some("Capital Region"), latitude: 64.1466, longitude: -21.9426 },
    GeoPoint { name: "New York", country: "US", state: Some("New York"), latitude: 40.7128, longitude: -74.0060 },
    GeoPoint { name: "Los Angeles", country: "US", state: Some("California"), latitude: 34.0522, longitude: -118.2437 },
    GeoPoint { name: "Chicago", country: "US", state: Some("Illinois"), latitude: 41.8781, longitude: -87.6298 },
    GeoPoint { name: "Toronto", country: "CA", state: Some("Ontario"), latitude: 43.6532, longitude: -79.3832 },
    GeoPoint { name: "Mexico City", country: "MX", state: Some("Mexico City"), latitude: 19.4326, longitude: -99.1332 },
    GeoPoint { name: "São Paulo", country: "BR", state: Some("São Paulo"), latitude: -23.5505, longitude: -46.6333 },
    GeoPoint { name: "Buenos Aires", country: "AR", state: Some("Buenos Aires"), latitude: -34.6037, longitude: -58.3816 },
    GeoPoint { name: "Tokyo", country: "JP", state: Some("Tokyo"), latitude: 35.6762, longitude: 139.6503 },
    GeoPoint { name: "Beijing", country: "CN", state: Some("Beijing"), latitude: 39.9042, longitude: 116.4074 },
    GeoPoint { name: "Mumbai", country: "IN", state: Some("Maharashtra"), latitude: 19.0760, longitude: 72.8777 },
    GeoPoint { name: "Sydney", country: "AU", state: Some("New South Wales"), latitude: -33.8688, longitude: 151.2093 },
    GeoPoint { name: "Cairo", country: "EG", state: Some("Cairo"), latitude: 30.0444, longitude: 31.2357 },
    GeoPoint { name: "Cape Town", country: "ZA", state: Some("Western Cape"), latitude: -33.9249, longitude: 18.4241 },
];
