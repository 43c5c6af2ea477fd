#[test]
fn serialize_deserialize_settings() {
    let settings = lasso_pixels::settings::Settings::default();
    let serialized = serde_json::to_string(&settings).unwrap();
    let deserialized: lasso_pixels::settings::Settings = serde_json::from_str(&serialized).unwrap();
    assert_eq!(settings, deserialized);
}

#[test]
fn serialize_deserialize_config() {
    let config = lasso_pixels::Config::default();
    let serialized = serde_json::to_string(&config).unwrap();
    let deserialized: lasso_pixels::Config = serde_json::from_str(&serialized).unwrap();
    assert_eq!(config, deserialized);
}
