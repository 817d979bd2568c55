use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use super::*;

fn set_mtime(path: &Path, time: SystemTime) -> std::io::Result<()> {
    File::options().write(true).open(path)?.set_modified(time)
}

#[test]
fn missing_output_is_not_up_to_date() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = tmp.path().join("a.cpp");
    fs::write(&input, "int main(){}\n")?;

    assert!(!is_up_to_date(&tmp.path().join("a.out"), [&input])?);
    Ok(())
}

#[test]
fn output_newer_than_inputs_is_up_to_date() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = tmp.path().join("a.cpp");
    let output = tmp.path().join("a.out");
    fs::write(&input, "int main(){}\n")?;
    fs::write(&output, "binary\n")?;
    set_mtime(&input, SystemTime::now() - Duration::from_secs(60))?;

    assert!(is_up_to_date(&output, [&input])?);
    Ok(())
}

#[test]
fn equal_mtimes_are_up_to_date() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = tmp.path().join("a.cpp");
    let output = tmp.path().join("a.out");
    fs::write(&input, "int main(){}\n")?;
    fs::write(&output, "binary\n")?;
    let stamp = SystemTime::now();
    set_mtime(&input, stamp)?;
    set_mtime(&output, stamp)?;

    assert!(is_up_to_date(&output, [&input])?);
    Ok(())
}

#[test]
fn newer_input_forces_rebuild() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let fresh = tmp.path().join("a.cpp");
    let old = tmp.path().join("b.cpp");
    let output = tmp.path().join("a.out");
    fs::write(&fresh, "int main(){}\n")?;
    fs::write(&old, "int helper(){}\n")?;
    fs::write(&output, "binary\n")?;
    set_mtime(&old, SystemTime::now() - Duration::from_secs(60))?;
    set_mtime(&fresh, SystemTime::now() + Duration::from_secs(60))?;

    assert!(!is_up_to_date(&output, [&fresh, &old])?);
    Ok(())
}

#[test]
fn missing_input_is_an_error() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let output = tmp.path().join("a.out");
    fs::write(&output, "binary\n")?;

    let err = is_up_to_date(&output, [tmp.path().join("gone.cpp")]).unwrap_err();
    let StaleError::Stat { path, .. } = err;
    assert!(path.ends_with("gone.cpp"));
    Ok(())
}
