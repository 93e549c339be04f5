// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use stockwatch_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_format() {
        let err = CoreError::InvalidFormat("bad header".into());
        assert_eq!(err.to_string(), "Invalid snapshot format: bad header");
    }

    #[test]
    fn invalid_format_empty_message() {
        let err = CoreError::InvalidFormat(String::new());
        assert_eq!(err.to_string(), "Invalid snapshot format: ");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported snapshot version: 99");
    }

    #[test]
    fn unsupported_version_max() {
        let err = CoreError::UnsupportedVersion(u16::MAX);
        assert_eq!(
            err.to_string(),
            format!("Unsupported snapshot version: {}", u16::MAX)
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("permission denied".into());
        assert_eq!(err.to_string(), "Storage error: permission denied");
    }

    #[test]
    fn feed() {
        let err = CoreError::Feed("connection reset".into());
        assert_eq!(err.to_string(), "Tick feed error: connection reset");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("threshold must be finite".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: threshold must be finite"
        );
    }
}

// ── Debug trait ─────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        let variants: Vec<CoreError> = vec![
            CoreError::InvalidFormat("test".into()),
            CoreError::UnsupportedVersion(1),
            CoreError::Serialization("test".into()),
            CoreError::Deserialization("test".into()),
            CoreError::Storage("test".into()),
            CoreError::Feed("test".into()),
            CoreError::ValidationError("test".into()),
        ];

        for variant in &variants {
            let debug = format!("{:?}", variant);
            assert!(!debug.is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::Storage(msg) => assert!(msg.contains("access denied")),
            other => panic!("Expected Storage, got {other:?}"),
        }
    }

    #[test]
    fn from_bincode_error() {
        let bincode_err = bincode::deserialize::<String>(&[0xFF; 2]).unwrap_err();
        let core_err: CoreError = bincode_err.into();
        assert!(matches!(core_err, CoreError::Serialization(_)));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::Deserialization(_)));
    }
}

// ── Trait object safety ─────────────────────────────────────────────

mod error_trait {
    use super::*;

    #[test]
    fn usable_as_boxed_error() {
        fn fails() -> Result<(), Box<dyn std::error::Error>> {
            Err(Box::new(CoreError::Feed("boom".into())))
        }

        let err = fails().unwrap_err();
        assert_eq!(err.to_string(), "Tick feed error: boom");
    }
}
