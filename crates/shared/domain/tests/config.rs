use chub_domain::config::{ApiConfig, CatalogConfig, DatabaseConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4712);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "postgres://localhost:5432/coursehub");
    assert_eq!(db.max_connections, 16);
    assert!(db.credentials.is_none());

    let catalog = CatalogConfig::default();
    assert_eq!(catalog.page_size, 10);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": {
            "url": "postgres://db:5432/catalog",
            "max_connections": 4,
            "credentials": { "username": "svc", "password": "secret" }
        },
        "catalog": { "page_size": 25 }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.max_connections, 4);
    assert_eq!(cfg.database.credentials.as_ref().map(|c| c.username.as_str()), Some("svc"));
    assert_eq!(cfg.catalog.page_size, 25);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: ApiConfig = serde_json::from_value(json!({})).expect("empty config");
    assert_eq!(cfg.server.port, 4712);
    assert_eq!(cfg.catalog.page_size, 10);
}
