use std::path::{Path, PathBuf};

/// `input` with its extension replaced by `.cpf`, next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
  input.with_extension("cpf")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replaces_vdscript_extension() {
    assert_eq!(
      default_output_path(Path::new("cuts/test.vdscript")),
      PathBuf::from("cuts/test.cpf")
    );
  }

  #[test]
  fn adds_extension_when_missing() {
    assert_eq!(
      default_output_path(Path::new("test")),
      PathBuf::from("test.cpf")
    );
  }
}
