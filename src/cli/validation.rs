//! Custom clap value parsers for CLI arguments.

use std::fs;
use std::path::PathBuf;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str
        .parse()
        .map_err(|_| format!("Port must be a number between 1 and 65535, got: '{port_str}'"))?;
    if port == 0 {
        return Err("Port 0 is not allowed".to_string());
    }
    Ok(port)
}

pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{path_str}'"));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{path_str}'"));
    }
    fs::File::open(&path)
        .map_err(|e| format!("Cannot read configuration file '{path_str}': {e}"))?;
    Ok(path)
}

pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{steps_str}'"))?;
    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }
    // Cap to prevent accidental mass rollbacks.
    if steps > 100 {
        return Err("Rollback steps cannot exceed 100".to_string());
    }
    Ok(steps)
}

pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();
    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }
    if host == "localhost" || host == "0.0.0.0" || host.starts_with("127.") {
        return Ok(host.to_string());
    }

    // Dotted-quad addresses get a real octet check.
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() == 4 {
            if parts.iter().any(|p| p.parse::<u8>().is_err()) {
                return Err(format!("Invalid IPv4 address format: '{host_str}'"));
            }
            return Ok(host.to_string());
        }
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }
    // Hostnames and IPv6 pass through; the bind call is the real check.
    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_range() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validate_port(port).is_ok(), "port {port} should be valid");
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "port {port} should be invalid");
        }
    }

    #[test]
    fn host_formats() {
        for host in ["localhost", "127.0.0.1", "0.0.0.0", "192.168.1.1", "example.com"] {
            assert!(validate_host_address(host).is_ok(), "host {host} should be valid");
        }
        let too_long = "x".repeat(300);
        for host in ["", "   ", "host with spaces", "999.999.999.999", too_long.as_str()] {
            assert!(validate_host_address(host).is_err(), "host '{host}' should be invalid");
        }
    }

    #[test]
    fn rollback_step_bounds() {
        for steps in ["1", "50", "100"] {
            assert!(validate_rollback_steps(steps).is_ok());
        }
        for steps in ["0", "101", "abc", ""] {
            assert!(validate_rollback_steps(steps).is_err());
        }
    }
}
