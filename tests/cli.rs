use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, api_base_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "api_base_url: {api_base_url}\nsession_id: guest-fixed\ntimeout_secs: 5\ncache_ttl:\n  products: 120\n"
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn storefront() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("storefront"));
    for var in [
        "STOREFRONT_CONFIG",
        "STOREFRONT_API_URL",
        "STOREFRONT_TOKEN",
        "STOREFRONT_FORMAT",
        "STOREFRONT_NO_CACHE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_resource_commands() {
    storefront()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("product"))
        .stdout(predicate::str::contains("cart"))
        .stdout(predicate::str::contains("bench"));
}

#[test]
fn completion_script_mentions_subcommands() {
    storefront()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storefront"))
        .stdout(predicate::str::contains("wishlist"));
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://shop.test/api");

    let assert = storefront()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("http://shop.test/api"));
    assert!(stdout.contains("Guest session: guest-fixed"));
    assert!(stdout.contains("products 120s"));
    assert!(stdout.contains("Browsing as guest"));

    Ok(())
}

#[test]
fn status_does_not_create_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("missing.yaml");

    storefront()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"));

    assert!(!config_path.exists());
    Ok(())
}

#[test]
fn invalid_api_url_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://shop.test/api");

    storefront()
        .args(["category", "list", "--api-url", "ftp://shop.test"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("api_base_url"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn product_get_prints_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _product = server
        .mock("GET", "/api/products/44")
        .match_header("x-session-id", "guest-fixed")
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"id":44,"name":"Desk Lamp","price":19.9}}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &format!("{}/api", server.url()));

    let assert = storefront()
        .args(["--format", "json", "product", "get", "44"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("\"name\": \"Desk Lamp\""));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn first_api_command_saves_session_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _categories = server
        .mock("GET", "/api/categories")
        .match_header("x-session-id", mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"id":1,"name":"Lighting"}]}"#)
        .create();

    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");

    storefront()
        .args(["category", "list", "--api-url"])
        .arg(format!("{}/api", server.url()))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lighting"));

    let saved = fs::read_to_string(&config_path)?;
    assert!(saved.contains("session_id:"));
    assert!(!saved.contains(&server.url()));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn application_failure_exits_nonzero() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _add = server
        .mock("POST", "/api/cart/add")
        .with_status(200)
        .with_body(r#"{"success":false,"message":"Product is out of stock","data":null}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &format!("{}/api", server.url()));

    storefront()
        .args(["cart", "add", "44"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Product is out of stock"));

    Ok(())
}
