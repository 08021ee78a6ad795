use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::library::{MapHandle, MapLibrary};
use std::io::Write;

/// Loads the map at the config's input path and saves it to the output path.
///
/// Writes `parsing <input>` before loading and `exported as <output>` after
/// saving to `out`. Load and save errors are returned as they are, nothing is
/// retried or cleaned up.
pub fn convert<L, W>(config: &ConvertConfig, library: &L, out: &mut W) -> Result<(), ConvertError>
where
    L: MapLibrary,
    W: Write,
{
    let input_path = config.input_path();
    let output_path = config.output_path();
    log::debug!("map name: {}", config.map_name().unwrap_or("<none>"));

    writeln!(out, "parsing {}", input_path.display())?;
    out.flush()?;

    let beg = std::time::Instant::now();
    let map = library.load(input_path).map_err(|source| ConvertError::Load {
        path: input_path.to_path_buf(),
        source,
    })?;
    log::info!("loaded in {}ms", beg.elapsed().as_millis());

    let beg = std::time::Instant::now();
    map.save(output_path).map_err(|source| ConvertError::Save {
        path: output_path.to_path_buf(),
        source,
    })?;
    log::info!("packed in {}ms", beg.elapsed().as_millis());

    writeln!(out, "exported as {}", output_path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Load(PathBuf),
        Save(PathBuf),
    }

    #[derive(Default)]
    struct MockLibrary {
        calls: RefCell<Vec<Call>>,
        fail_load: bool,
        fail_save: bool,
    }

    struct MockMap<'a> {
        library: &'a MockLibrary,
    }

    impl<'a> MapLibrary for &'a MockLibrary {
        type Map = MockMap<'a>;

        fn load(&self, path: &Path) -> Result<MockMap<'a>, MapError> {
            self.calls.borrow_mut().push(Call::Load(path.to_path_buf()));
            if self.fail_load {
                return Err(MapError::NotAFolder(path.to_path_buf()));
            }
            Ok(MockMap { library: *self })
        }
    }

    impl MapHandle for MockMap<'_> {
        fn save(&self, path: &Path) -> Result<(), MapError> {
            self.library
                .calls
                .borrow_mut()
                .push(Call::Save(path.to_path_buf()));
            if self.library.fail_save {
                return Err(MapError::MissingMagicNumber);
            }
            Ok(())
        }
    }

    fn run(library: &MockLibrary, input: &str, output: &str) -> (Result<(), ConvertError>, String) {
        let config = ConvertConfig::new(input, output);
        let mut out = Vec::new();
        let result = convert(&config, &library, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_both_lines_and_calls_in_order() {
        let library = MockLibrary::default();
        let (result, out) = run(&library, "/tmp/mymap", "/tmp/out.map");

        result.unwrap();
        assert_eq!(out, "parsing /tmp/mymap\nexported as /tmp/out.map\n");
        assert_eq!(
            *library.calls.borrow(),
            vec![
                Call::Load(PathBuf::from("/tmp/mymap")),
                Call::Save(PathBuf::from("/tmp/out.map")),
            ]
        );
    }

    #[test]
    fn loads_normalized_path() {
        let library = MockLibrary::default();
        let (result, out) = run(&library, "a/b/../b/map", "out.map");

        result.unwrap();
        assert!(out.starts_with("parsing a/b/map\n"));
        assert_eq!(library.calls.borrow()[0], Call::Load(PathBuf::from("a/b/map")));
    }

    #[test]
    fn load_failure_skips_save() {
        let library = MockLibrary {
            fail_load: true,
            ..Default::default()
        };
        let (result, out) = run(&library, "missing", "out.map");

        assert!(matches!(result, Err(ConvertError::Load { .. })));
        assert_eq!(out, "parsing missing\n");
        assert_eq!(library.calls.borrow().len(), 1);
    }

    #[test]
    fn save_failure_has_no_confirmation() {
        let library = MockLibrary {
            fail_save: true,
            ..Default::default()
        };
        let (result, out) = run(&library, "map", "out.map");

        let err = result.unwrap_err();
        assert!(matches!(err, ConvertError::Save { ref path, .. } if path == Path::new("out.map")));
        assert_eq!(out, "parsing map\n");
    }
}
