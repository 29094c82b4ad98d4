fn main() {
    println!("cargo:rerun-if-env-changed=SWITCHLINK_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_TRANSPORT");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_HTTP_ENDPOINT");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_MQTT_HOST");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_MQTT_USERNAME");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_MQTT_PASSWORD");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_MQTT_CLIENT_ID");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_ENTERPRISE_ID");
    println!("cargo:rerun-if-env-changed=SWITCHLINK_DEVICE_ID");

    if let Ok(transport) = std::env::var("SWITCHLINK_TRANSPORT") {
        let known = ["http", "mqtt"];
        if !known.iter().any(|k| transport.eq_ignore_ascii_case(k)) {
            panic!("SWITCHLINK_TRANSPORT must be 'http' or 'mqtt', got '{transport}'");
        }
    }

    // Host builds (tests, simulation) never link against ESP-IDF.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
