//! Shared test utilities
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Cached binary path for the oaslint CLI to avoid repeated lookups
#[allow(deprecated)] // TODO: Migrate to cargo_bin! macro when LazyLock-compatible
pub static OASLINT_BIN: std::sync::LazyLock<PathBuf> =
    std::sync::LazyLock::new(|| assert_cmd::cargo::cargo_bin("oaslint"));

/// Test helper to create a command with the cached binary
pub fn oaslint_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(&*OASLINT_BIN);
    cmd.env_remove("OASLINT_LOG")
        .env_remove("OASLINT_LOG_FORMAT")
        .env_remove("OASLINT_LOG_FILE");
    cmd
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Swagger 2.0 document with a self-referencing definition and a duplicate operationId.
pub const SWAGGER_PETSTORE: &str = "\
swagger: '2.0'
info:
  title: Pets
  version: '1.0'
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        200:
          description: ok
          schema:
            $ref: '#/definitions/Pet'
  /pets/{id}:
    get:
      operationId: listPets
      responses:
        200:
          description: ok
definitions:
  Pet:
    type: object
    properties:
      name:
        type: string
      parent:
        $ref: '#/definitions/Pet'
";

/// OpenAPI 3.0 document with nothing to report.
pub const CLEAN_OPENAPI: &str = r#"{
  "openapi": "3.0.3",
  "info": {"title": "Clean", "version": "1.0"},
  "paths": {
    "/things": {
      "get": {
        "operationId": "listThings",
        "responses": {"200": {"description": "ok"}}
      }
    }
  }
}
"#;
