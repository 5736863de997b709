//! Formularios multipart: una parte `request` con el JSON y una parte
//! `images` por cada foto.

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use super::{ClientError, ClientResult};

/// Imagen ya decodificada, lista para subir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Tipo MIME, p. ej. `image/png`
    pub mime: String,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, mime: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }
}

/// Construye el formulario `request` + `images`
///
/// Las imágenes se nombran `photo0.jpg`, `photo1.jpg`... sea cual sea su tipo.
pub fn multipart_form<T: Serialize>(request: &T, images: &[ImageUpload]) -> ClientResult<Form> {
    let json = serde_json::to_string(request)?;
    let request_part = Part::text(json)
        .mime_str("application/json")
        .map_err(|e| ClientError::transport("build_multipart", e))?;

    let mut form = Form::new().part("request", request_part);

    for (index, image) in images.iter().enumerate() {
        let part = Part::bytes(image.bytes.clone())
            .file_name(format!("photo{}.jpg", index))
            .mime_str(&image.mime)
            .map_err(|e| ClientError::transport("build_multipart", e))?;
        form = form.part("images", part);
    }

    Ok(form)
}
