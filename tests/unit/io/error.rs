//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use nmbr9::Nmbr9Error;
    use nmbr9::io::error::{WithPath, invalid_parameter};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Nmbr9Error::FileSystem {
            path: "/tmp/out".into(),
            operation: "create directory",
            source: io_error,
        };
        assert!(error.source().is_some());
        assert!(invalid_parameter("copies", &0, &"too few").source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("grid-size", &3, &"grid-size must be between 6 and 64");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'grid-size' = '3': grid-size must be between 6 and 64"
        );
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = Nmbr9Error::ImageExport {
            path: PathBuf::from("/out/level_0.png"),
            source: image_error,
        };
        let message = error.to_string();
        assert!(message.contains("/out/level_0.png"));
        assert!(message.contains("access denied"));
    }

    // Tests with_path replaces the placeholder path and operation
    // Verified by returning the converted error unchanged
    #[test]
    fn test_with_path() {
        let failed: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let error = failed.with_path(Path::new("/out"), "write report");
        match error {
            Err(Nmbr9Error::FileSystem { path, operation, .. }) => {
                assert_eq!(path, PathBuf::from("/out"));
                assert_eq!(operation, "write report");
            }
            other => panic!("unexpected {other:?}"),
        }

        let fine: std::result::Result<u8, std::io::Error> = Ok(3);
        assert_eq!(fine.with_path(Path::new("/out"), "write").ok(), Some(3));
    }

    // Tests conversions from library errors use placeholder paths
    // Verified by dropping the source in the conversion
    #[test]
    fn test_from_conversions() {
        let error: Nmbr9Error = std::io::Error::other("boom").into();
        assert!(error.to_string().contains("<unknown>"));
        assert!(error.source().is_some());
    }
}
