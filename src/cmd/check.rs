// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use std::path::PathBuf;

use crate::error::Fallible;
use crate::library::Library;

pub fn check_library(directory: Option<String>) -> Fallible<()> {
    let _ = Library::load(directory.map(PathBuf::from))?;
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::check_library;
    use crate::error::Fallible;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_library(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_builtin_content() {
        assert!(check_library(None).is_ok());
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().to_string_lossy().to_string();
        assert!(check_library(Some(path)).is_ok());
        Ok(())
    }

    #[test]
    fn test_invalid_content() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("dispositions.toml"), "dispositions = []\n")?;
        let path = dir.path().to_string_lossy().to_string();
        assert!(check_library(Some(path)).is_err());
        Ok(())
    }
}
