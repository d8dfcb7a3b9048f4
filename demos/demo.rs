//! Tour of the output formats
//!
//! ```sh
//! LOG=debug cargo run --example demo
//! LOG=debug LOG_TIME=true cargo run --example demo
//! ```

use hiplog::prelude::*;
use hiplog::{error, info};
use std::fs;
use std::io::{self, Write};

fn load_settings() -> Result<String> {
    fs::read_to_string("/nonexistent/hiplog/settings.toml")
        .map_err(|e| LoggerError::io_operation("read", "could not load settings", e))
}

fn main() -> Result<()> {
    let log = hiplog::from_env(ConfigOverrides::new());
    let blank = || writeln!(io::stdout()).map_err(LoggerError::from);

    blank()?;

    // Log levels
    log.debug(&["messages to debug an application".into()])?;
    log.info(&["a purely informational message".into()])?;
    log.notice(&["a normal but significant condition".into()])?;
    log.warning(&["warning condition".into()])?;
    log.error(&["error condition".into()])?;
    log.critical(&["the system is in critical condition".into()])?;
    log.alert(&["action must be taken immediately".into()])?;
    log.emergency(&["system is unusable".into()])?;
    blank()?;

    // Values
    info!(log, "boolean:", true, false)?;
    info!(log, "null:", Value::Null)?;
    info!(log, "undefined:", Value::Undefined)?;
    info!(log, "number:", 1, 2, 3)?;
    info!(log, "regexp:", Value::regex("foo", ""))?;
    info!(log, "array:", vec!["foo", "bar"])?;
    info!(log, "object:", Object::new().with("foo", "bar"))?;
    blank()?;

    // Objects
    let small = Object::new().with("int", 123).with("bool", true).with("str", "Hello");
    info!(log, "a small object:", small)?;
    blank()?;

    let circular = Object::new();
    circular.insert("inner", &circular);
    let bigger = Object::new()
        .with("null", Value::Null)
        .with("undefined", Value::Undefined)
        .with("integer", 123)
        .with("boolean", true)
        .with("string", "Hello")
        .with("function", Value::function("my_function"))
        .with("circular", &circular)
        .with("array", vec!["one", "two", "three", "four"]);
    info!(log, "a bigger object", bigger)?;

    // Error
    if let Err(e) = load_settings() {
        error!(log, Value::from_error(&e))?;
    }
    error!(log, ErrorValue::new("Error example"))?;

    log.flush()
}
