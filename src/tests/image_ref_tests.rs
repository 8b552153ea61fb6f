#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use crate::errors::ErrorKind;
    use crate::models::image::{ media_type_for, ImageRef };

    #[test]
    fn test_parse_https_url() {
        let image = ImageRef::parse(" https://example.com/math.jpg?w=750 ").unwrap();
        assert_eq!(image, ImageRef::Url { url: "https://example.com/math.jpg?w=750".to_string() });
        assert_eq!(image.to_model_url(), "https://example.com/math.jpg?w=750");
    }

    #[test]
    fn test_image_refs_serialize_with_type_tag() {
        let url = ImageRef::parse("https://example.com/a.png").unwrap();
        let value = serde_json::to_value(&url).unwrap();
        assert_eq!(value, json!({ "type": "url", "url": "https://example.com/a.png" }));
        assert_eq!(serde_json::from_value::<ImageRef>(value).unwrap(), url);

        let inline = ImageRef::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        let value = serde_json::to_value(&inline).unwrap();
        assert_eq!(value["type"], json!("inline"));
        assert_eq!(value["media_type"], json!("image/png"));
        assert_eq!(serde_json::from_value::<ImageRef>(value).unwrap(), inline);
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        for source in ["ftp://example.com/a.png", "file:///tmp/a.png", "not a url", ""] {
            let err = ImageRef::parse(source).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InputValidation, "{}", source);
        }
    }

    #[test]
    fn test_parse_data_uri() {
        let image = ImageRef::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(image, ImageRef::Inline {
            media_type: "image/png".to_string(),
            data: "iVBORw0KGgo=".to_string(),
        });
        assert_eq!(image.to_model_url(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_parse_rejects_malformed_data_uris() {
        let sources = [
            "data:image/png;base64",
            "data:image/png,iVBORw0KGgo=",
            "data:text/plain;base64,aGVsbG8=",
            "data:image/png;base64,",
            "data:image/png;base64,***",
        ];
        for source in sources {
            let err = ImageRef::parse(source).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InputValidation, "{}", source);
        }
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(media_type_for(Path::new("a.JPG")).unwrap(), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.jpeg")).unwrap(), "image/jpeg");
        assert_eq!(media_type_for(Path::new("dir/a.png")).unwrap(), "image/png");
        assert_eq!(media_type_for(Path::new("a.webp")).unwrap(), "image/webp");
        assert!(media_type_for(Path::new("a.bmp")).is_err());
        assert!(media_type_for(Path::new("noext")).is_err());
    }

    #[test]
    fn test_from_file_encodes_contents() {
        let path = std::env::temp_dir().join(format!("mathscribe-test-{}.png", std::process::id()));
        std::fs::write(&path, b"abc").unwrap();

        let image = ImageRef::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.to_model_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_from_file_missing() {
        let err = ImageRef::from_file(Path::new("/definitely/missing/problem.png")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[test]
    fn test_from_bytes_rejects_empty() {
        assert!(ImageRef::from_bytes(&[], "image/png").is_err());
    }
}
