use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Arc;

/// The only file name the evaluation service accepts.
pub const REQUIRED_NAME: &str = "cv.pdf";

/// 5 MiB.
pub const MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Where the bytes of a selected file come from.
#[derive(Debug, Clone)]
pub enum Payload {
    #[cfg(test)]
    Bytes(Arc<[u8]>),
    /// Read lazily by the upload worker.
    File(PathBuf),
}

impl Payload {
    pub fn read(&self) -> io::Result<Vec<u8>> {
        match self {
            #[cfg(test)]
            Payload::Bytes(bytes) => Ok(bytes.to_vec()),
            Payload::File(path) => fs::read(path),
        }
    }
}

/// A file picked by the user, not yet validated.
#[derive(Debug, Clone)]
pub struct Selection {
    name: String,
    size: u64,
    payload: Payload,
}

impl Selection {
    pub fn new(name: impl Into<String>, size: u64, payload: Payload) -> Self {
        Self {
            name: name.into(),
            size,
            payload,
        }
    }

    #[cfg(test)]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self::new(name, size, Payload::Bytes(bytes.into()))
    }

    /// Builds a selection from file metadata without reading the file.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(
            name,
            metadata.len(),
            Payload::File(path.to_path_buf()),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// A selection that passed validation.
#[derive(Debug, Clone)]
pub struct CandidateInput {
    name: String,
    size: u64,
    payload: Payload,
}

impl CandidateInput {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Reads the payload and checks it still has the validated length.
    /// A file rewritten after selection is refused.
    pub fn read_payload(&self) -> io::Result<Vec<u8>> {
        let bytes = self.payload.read()?;
        let len = bytes.len() as u64;
        if len != self.size || len > MAX_SIZE_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "{} changed since selection: {} bytes, expected {}",
                    self.name, len, self.size
                ),
            ));
        }
        Ok(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Missing,
    WrongName,
    TooLarge,
}

impl Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing => write!(f, "Select the file \"{}\" first.", REQUIRED_NAME),
            ValidationError::WrongName => {
                write!(f, "The file must be named exactly \"{}\".", REQUIRED_NAME)
            }
            ValidationError::TooLarge => write!(f, "The file must not be larger than 5 MB."),
        }
    }
}

/// Checks a selection against the acceptance rules. First failing rule wins.
pub fn validate(selection: Option<Selection>) -> Result<CandidateInput, ValidationError> {
    let selection = selection.ok_or(ValidationError::Missing)?;
    if selection.name != REQUIRED_NAME {
        return Err(ValidationError::WrongName);
    }
    if selection.size > MAX_SIZE_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(CandidateInput {
        name: selection.name,
        size: selection.size,
        payload: selection.payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    const MB: u64 = 1024 * 1024;

    fn sized(name: &str, size: u64) -> Option<Selection> {
        Some(Selection::new(name, size, Payload::Bytes(Arc::from(Vec::new()))))
    }

    #[test]
    fn missing_file_is_rejected() {
        assert_eq!(validate(None).unwrap_err(), ValidationError::Missing);
    }

    #[test]
    fn resume_pdf_has_wrong_name() {
        assert_eq!(
            validate(sized("resume.pdf", MB)).unwrap_err(),
            ValidationError::WrongName
        );
    }

    #[test]
    fn name_check_runs_before_size_check() {
        assert_eq!(
            validate(sized("CV.pdf", 10 * MB)).unwrap_err(),
            ValidationError::WrongName
        );
    }

    #[test]
    fn six_megabytes_is_too_large() {
        assert_eq!(
            validate(sized("cv.pdf", 6 * MB)).unwrap_err(),
            ValidationError::TooLarge
        );
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(validate(sized("cv.pdf", MAX_SIZE_BYTES)).is_ok());
        assert_eq!(
            validate(sized("cv.pdf", MAX_SIZE_BYTES + 1)).unwrap_err(),
            ValidationError::TooLarge
        );
    }

    #[test]
    fn accepted_candidate_keeps_payload() {
        let candidate = validate(Some(Selection::from_bytes("cv.pdf", b"%PDF-1.4".to_vec())))
            .unwrap();
        assert_eq!(candidate.name(), "cv.pdf");
        assert_eq!(candidate.size(), 8);
        assert_eq!(candidate.read_payload().unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn selection_from_path_uses_file_name_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        let selection = Selection::from_path(&path).unwrap();
        assert_eq!(selection.name(), "cv.pdf");
        assert_eq!(selection.size(), 2048);

        let candidate = validate(Some(selection)).unwrap();
        assert_eq!(candidate.read_payload().unwrap().len(), 2048);
    }

    #[test]
    fn file_grown_after_validation_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        fs::write(&path, b"%PDF").unwrap();
        let candidate = validate(Some(Selection::from_path(&path).unwrap())).unwrap();
        assert_eq!(candidate.size(), 4);

        fs::write(&path, vec![0u8; 6 * MB as usize]).unwrap();
        let error = candidate.read_payload().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn file_shrunk_after_validation_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        fs::write(&path, vec![1u8; 2048]).unwrap();
        let candidate = validate(Some(Selection::from_path(&path).unwrap())).unwrap();

        fs::write(&path, b"%PDF").unwrap();
        assert_eq!(
            candidate.read_payload().unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }

    #[test]
    fn nested_path_is_judged_by_file_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        fs::write(&path, b"x").unwrap();
        let selection = Selection::from_path(&path).unwrap();
        assert_eq!(validate(Some(selection)).unwrap_err(), ValidationError::WrongName);
    }

    proptest! {
        #[test]
        fn any_other_name_is_wrong(name in "\\PC*", size in 0..MAX_SIZE_BYTES) {
            prop_assume!(name != REQUIRED_NAME);
            prop_assert_eq!(validate(sized(&name, size)).unwrap_err(), ValidationError::WrongName);
        }

        #[test]
        fn any_oversized_cv_is_too_large(size in (MAX_SIZE_BYTES + 1)..u64::MAX) {
            prop_assert_eq!(validate(sized("cv.pdf", size)).unwrap_err(), ValidationError::TooLarge);
        }
    }
}
