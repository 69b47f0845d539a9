use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::language::SourceLanguage;

/// Normalize a discovered file path into a node id.
///
/// Node ids and resolved import targets go through the same lexical cleanup,
/// so `./src/a.ts` and `src/lib/../a.ts` both become `src/a.ts`.
pub fn normalize_id(path: &Path) -> String {
    path.clean().to_string_lossy().into_owned()
}

/// Resolve a relative import specifier from the perspective of `from_file`.
///
/// Purely lexical: the specifier is joined onto the importing file's directory
/// and cleaned, and the language's default extension is appended when the
/// result has none. The file system is never consulted, so the result may name
/// a file that does not exist (e.g. a directory import with no index probing).
pub fn resolve_import(from_file: &str, specifier: &str, language: SourceLanguage) -> String {
    let dir = Path::new(from_file).parent().unwrap_or(Path::new(""));
    let resolved = with_default_extension(dir.join(specifier).clean(), language);
    resolved.to_string_lossy().into_owned()
}

fn with_default_extension(path: PathBuf, language: SourceLanguage) -> PathBuf {
    if path.extension().is_some() {
        return path;
    }
    let mut raw: OsString = path.into_os_string();
    raw.push(language.default_extension());
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_import_gets_extension() {
        assert_eq!(
            resolve_import("src/index.ts", "./api", SourceLanguage::Ts),
            "src/api.ts"
        );
    }

    #[test]
    fn test_js_language_appends_js() {
        assert_eq!(
            resolve_import("lib/main.js", "./util", SourceLanguage::Js),
            "lib/util.js"
        );
    }

    #[test]
    fn test_parent_directory_is_collapsed() {
        assert_eq!(
            resolve_import("src/utils/error.ts", "../config", SourceLanguage::Ts),
            "src/config.ts"
        );
        assert_eq!(
            resolve_import("src/utils/error.ts", "./../api", SourceLanguage::Ts),
            "src/api.ts"
        );
    }

    #[test]
    fn test_explicit_extension_is_kept() {
        assert_eq!(
            resolve_import("src/index.ts", "./data.json", SourceLanguage::Ts),
            "src/data.json"
        );
        assert_eq!(
            resolve_import("src/index.ts", "./legacy.js", SourceLanguage::Ts),
            "src/legacy.js"
        );
    }

    #[test]
    fn test_directory_import_has_no_index_fallback() {
        // No index-file fallback: `./utils` names `utils.ts`, whether or not it exists.
        assert_eq!(
            resolve_import("src/index.ts", "./utils/", SourceLanguage::Ts),
            "src/utils.ts"
        );
    }

    #[test]
    fn test_root_level_file() {
        assert_eq!(resolve_import("a.ts", "./b", SourceLanguage::Ts), "b.ts");
    }

    #[test]
    fn test_absolute_importer_stays_absolute() {
        assert_eq!(
            resolve_import("/proj/src/a.ts", "../lib/b", SourceLanguage::Ts),
            "/proj/lib/b.ts"
        );
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(Path::new("./src/./a.ts")), "src/a.ts");
        assert_eq!(normalize_id(Path::new("src/lib/../a.ts")), "src/a.ts");
    }

    #[test]
    fn test_resolution_matches_normalized_ids() {
        let importer = normalize_id(Path::new("./src/utils/logger.ts"));
        let target = resolve_import(&importer, "./formatter", SourceLanguage::Ts);
        assert_eq!(target, normalize_id(Path::new("./src/utils/formatter.ts")));
    }
}
