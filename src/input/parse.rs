use crate::{core::geo::LatLng, MapError, Result};

/// Parse "latitude, longitude" as copied from a web map.
///
/// Commas count as whitespace, so `60.2, 29.7`, `60.2,29.7` and `60.2 29.7`
/// are all accepted. Exactly two numbers are required. `nan` and `inf` parse
/// like any other number and simply never land on the map.
pub fn parse_coordinates(text: &str) -> Result<LatLng> {
    let normalized = text.replace(',', " ");
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let [lat, lng] = tokens.as_slice() else {
        return Err(MapError::InputParse(format!(
            "expected two numbers, got {}",
            tokens.len()
        )));
    };

    Ok(LatLng::new(parse_number(lat)?, parse_number(lng)?))
}

fn parse_number(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| MapError::InputParse(format!("'{}' is not a number", token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_and_space() {
        let coord = parse_coordinates("60.21662, 29.75197").unwrap();
        assert_eq!(coord, LatLng::new(60.21662, 29.75197));
    }

    #[test]
    fn test_separators() {
        let expected = LatLng::new(60.2, 29.7);
        assert_eq!(parse_coordinates("60.2,29.7").unwrap(), expected);
        assert_eq!(parse_coordinates("  60.2   29.7\n").unwrap(), expected);
        assert_eq!(parse_coordinates("60.2 ,, 29.7").unwrap(), expected);
    }

    #[test]
    fn test_negative_and_integer() {
        assert_eq!(
            parse_coordinates("-33, 151").unwrap(),
            LatLng::new(-33.0, 151.0)
        );
    }

    #[test]
    fn test_wrong_token_count() {
        assert!(matches!(parse_coordinates("60.2"), Err(MapError::InputParse(_))));
        assert!(matches!(parse_coordinates(""), Err(MapError::InputParse(_))));
        assert!(matches!(
            parse_coordinates("not,a,number"),
            Err(MapError::InputParse(_))
        ));
        assert!(parse_coordinates("1 2 3").is_err());
    }

    #[test]
    fn test_non_numeric() {
        assert!(matches!(
            parse_coordinates("sixty, 29.7"),
            Err(MapError::InputParse(_))
        ));
        assert!(parse_coordinates("60.2°, 29.7°").is_err());
    }

    #[test]
    fn test_non_finite_numbers_parse() {
        assert!(parse_coordinates("nan, 29.7").unwrap().lat.is_nan());
        assert_eq!(parse_coordinates("60.2, inf").unwrap().lng, f64::INFINITY);
        assert!(!parse_coordinates("-inf 0").unwrap().is_finite());
    }
}
