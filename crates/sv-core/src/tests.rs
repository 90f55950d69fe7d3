//! Unit tests for sv-core primitives.

#[cfg(test)]
mod ids {
    use std::collections::HashMap;

    use crate::CityId;

    #[test]
    fn leading_zeros_are_significant() {
        assert_ne!(CityId::from("001"), CityId::from("1"));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(CityId::new(" 554 "), CityId::from("554"));
        assert_eq!(CityId::from(String::from("554\r")).as_str(), "554");
    }

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(CityId::from("001"), "Alpha");
        assert_eq!(map.get("001"), Some(&"Alpha"));
    }

    #[test]
    fn display() {
        assert_eq!(CityId::from("500011").to_string(), "500011");
    }
}

#[cfg(test)]
mod frame {
    use crate::{CoreError, FrameIndex};

    #[test]
    fn next_and_add() {
        assert_eq!(FrameIndex::ZERO.next(), FrameIndex(1));
        assert_eq!(FrameIndex(3) + 4, FrameIndex(7));
    }

    #[test]
    fn snapshot_names_are_zero_padded() {
        assert_eq!(FrameIndex(0).snapshot_file_name(), "frame0000.csv");
        assert_eq!(FrameIndex(7).snapshot_file_name(), "frame0007.csv");
        assert_eq!(FrameIndex(12345).snapshot_file_name(), "frame12345.csv");
    }

    #[test]
    fn snapshot_name_parse() {
        assert_eq!(FrameIndex::from_snapshot_file_name("frame0042.csv"), Ok(FrameIndex(42)));
        assert_eq!(FrameIndex::from_snapshot_file_name("frame12345.csv"), Ok(FrameIndex(12345)));
    }

    #[test]
    fn snapshot_name_rejects_foreign_files() {
        for name in ["merged.csv", "frame42.csv", "frame00a1.csv", "frame0001.txt"] {
            assert!(
                matches!(FrameIndex::from_snapshot_file_name(name), Err(CoreError::InvalidSnapshotName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn from_str() {
        assert_eq!(" 9 ".parse::<FrameIndex>(), Ok(FrameIndex(9)));
        assert!("-1".parse::<FrameIndex>().is_err());
    }
}

#[cfg(test)]
mod geo {
    use crate::{CoreError, GeoPoint};

    #[test]
    fn parse_pair() {
        let p = GeoPoint::parse("50.0", " 14.25").unwrap();
        assert_eq!(p, GeoPoint::new(50.0, 14.25));
        assert!(p.is_valid());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            GeoPoint::parse("north", "14.0"),
            Err(CoreError::InvalidCoordinate("north".into()))
        );
        assert!(GeoPoint::parse("50.0", "NaN").is_err());
    }

    #[test]
    fn out_of_range_is_invalid() {
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    }
}
