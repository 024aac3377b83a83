//! Device resolution config file.
//!
//! ```text
//! # panel size
//! width = 320
//! height = 240
//! ```
//!
//! A single `320x240` line is accepted as well.

use std::path::Path;
use std::string::String;

use crate::geometry::DeviceResolution;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "config.txt";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("config sets no {0}")]
    Missing(&'static str),
}

fn syntax(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Syntax {
        line,
        message: message.into(),
    }
}

fn parse_dim(line: usize, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| syntax(line, std::format!("`{}` is not a pixel count", value.trim())))
}

/// Parse config text.
pub fn parse_device_resolution(text: &str) -> Result<DeviceResolution, ConfigError> {
    let mut width = None;
    let mut height = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        if let Some((key, value)) = content.split_once('=') {
            match key.trim().to_ascii_lowercase().as_str() {
                "width" => width = Some(parse_dim(line, value)?),
                "height" => height = Some(parse_dim(line, value)?),
                other => return Err(syntax(line, std::format!("unknown key `{other}`"))),
            }
        } else if let Some((w, h)) = content.split_once(['x', 'X']) {
            width = Some(parse_dim(line, w)?);
            height = Some(parse_dim(line, h)?);
        } else {
            let message = std::format!("expected `key = value` or `WxH`, got `{content}`");
            return Err(syntax(line, message));
        }
    }

    Ok(DeviceResolution {
        width: width.ok_or(ConfigError::Missing("width"))?,
        height: height.ok_or(ConfigError::Missing("height"))?,
    })
}

/// Read and parse a config file.
pub fn load_device_resolution(path: impl AsRef<Path>) -> Result<DeviceResolution, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_device_resolution(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_lines() {
        let res = parse_device_resolution("# lcd\nwidth = 320\n\nHEIGHT=240 # rows\n").unwrap();
        assert_eq!(res, DeviceResolution::new(320, 240));
    }

    #[test]
    fn compact_form() {
        assert_eq!(
            parse_device_resolution("800x480\n").unwrap(),
            DeviceResolution::new(800, 480)
        );
    }

    #[test]
    fn missing_height() {
        assert!(matches!(
            parse_device_resolution("width=10"),
            Err(ConfigError::Missing("height"))
        ));
    }

    #[test]
    fn bad_number_reports_line() {
        assert!(matches!(
            parse_device_resolution("width=10\nheight=tall"),
            Err(ConfigError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_device_resolution("/nonexistent/bmp2raw/config.txt").unwrap_err();
        match err {
            ConfigError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected {other:?}"),
        }
    }
}
