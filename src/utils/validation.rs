use crate::utils::error::{Result, SurveyError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SurveyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SurveyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SurveyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SurveyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SurveyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Parse an area parameter as supplied to the fee query endpoints.
pub fn parse_area(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| SurveyError::InvalidArea {
            value: value.to_string(),
        })?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(SurveyError::InvalidArea {
            value: value.to_string(),
        });
    }
    Ok(parsed)
}

/// Parse a plot-count parameter, enforcing the minimum meaningful value.
pub fn parse_plot_count(value: &str, minimum: u32) -> Result<u32> {
    let parsed: u32 = value
        .trim()
        .parse()
        .map_err(|_| SurveyError::InvalidPlotCount {
            value: value.to_string(),
            minimum,
        })?;
    if parsed < minimum {
        return Err(SurveyError::InvalidPlotCount {
            value: value.to_string(),
            minimum,
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("zoning_endpoint", "https://example.com").is_ok());
        assert!(validate_url("zoning_endpoint", "http://example.com").is_ok());
        assert!(validate_url("zoning_endpoint", "").is_err());
        assert!(validate_url("zoning_endpoint", "invalid-url").is_err());
        assert!(validate_url("zoning_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_parse_area() {
        assert_eq!(parse_area("237000").unwrap(), 237000.0);
        assert_eq!(parse_area(" 1250.5 ").unwrap(), 1250.5);
        assert!(parse_area("-1").is_err());
        assert!(parse_area("NaN").is_err());
        assert!(parse_area("twelve").is_err());
        assert!(parse_area("").is_err());
    }

    #[test]
    fn test_parse_plot_count() {
        assert_eq!(parse_plot_count("2", 2).unwrap(), 2);
        assert_eq!(parse_plot_count("150", 2).unwrap(), 150);
        assert!(parse_plot_count("1", 2).is_err());
        assert!(parse_plot_count("0", 2).is_err());
        assert!(parse_plot_count("-3", 2).is_err());
        assert!(parse_plot_count("4.5", 2).is_err());
    }
}
