
use assert_cmd::Command;
use predicates::str;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_utilities::{copy_dir, testdata, CONVERTER};

#[test]
fn converts_map_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("mymap");
    copy_dir(&testdata("testMap"), &input);
    let output = dir.path().join("out.map");

    Command::new(CONVERTER)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(format!(
            "parsing {}\nexported as {}\n",
            input.display(),
            output.display()
        ));

    assert!(output.is_file());
    Ok(())
}

#[test]
fn normalizes_input_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("a/b/map");
    copy_dir(&testdata("testMap"), &input);
    let output = dir.path().join("out.map");
    let messy = format!("{}/a/b/../b/./map/", dir.path().display());

    Command::new(CONVERTER)
        .args(["-i", &messy, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(str::starts_with(format!("parsing {}\n", input.display())));

    assert!(output.is_file());
    Ok(())
}

#[test]
fn same_input_gives_identical_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("out.map");

    let mut runs = Vec::new();
    for _ in 0..2 {
        Command::new(CONVERTER)
            .arg("-i")
            .arg(testdata("testMap"))
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        runs.push(std::fs::read(&output)?);
    }

    assert_eq!(runs[0], runs[1]);
    Ok(())
}

#[test]
fn missing_input_dir_fails_without_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("nope");
    let output = dir.path().join("out.map");

    Command::new(CONVERTER)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stdout(format!("parsing {}\n", input.display()))
        .stderr(str::contains("NotAFolder"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn broken_map_dir_fails_without_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("broken");
    copy_dir(&testdata("testMap"), &input);
    std::fs::remove_file(input.join("version.json"))?;
    let output = dir.path().join("out.map");

    Command::new(CONVERTER)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(str::contains("version.json"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn unwritable_output_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("no/such/dir/out.map");

    Command::new(CONVERTER)
        .arg("-i")
        .arg(testdata("testMap"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(str::contains("Save"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn missing_output_flag_is_usage_error() {
    Command::new(CONVERTER)
        .arg("-i")
        .arg(testdata("testMap"))
        .assert()
        .failure()
        .code(2)
        .stdout(str::is_empty())
        .stderr(str::contains("Usage: converter"));
}

#[test]
fn missing_input_flag_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("out.map");

    Command::new(CONVERTER)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(2)
        .stdout(str::is_empty());

    assert!(!output.exists());
    Ok(())
}

#[test]
fn unknown_flag_is_usage_error() {
    Command::new(CONVERTER)
        .args(["-i", "a", "-o", "b", "-x"])
        .assert()
        .failure()
        .code(2)
        .stdout(str::is_empty());
}

#[test]
fn hidden_files_in_groups_do_not_break_conversion() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("mymap");
    copy_dir(&testdata("testMap"), &input);
    std::fs::write(input.join("groups/.DS_Store"), "clutter")?;
    let output = dir.path().join("out.map");

    Command::new(CONVERTER)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(output.is_file());
    Ok(())
}
