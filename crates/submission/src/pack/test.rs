use std::fs;
use std::path::Path;

use super::*;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn pack_to(sources: Vec<std::path::PathBuf>, output: &Path) -> Result<(), PackError> {
    pack(&PackRequest {
        source_files: sources,
        output_path: output.to_path_buf(),
    })
}

#[test]
fn flattens_single_include() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "#include \"b.h\"\nint main(){}\n");
    write(tmp.path(), "b.h", "int helper();\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a], &out)?;

    assert_eq!(fs::read_to_string(&out)?, "int helper();\nint main(){}\n");
    Ok(())
}

#[test]
fn resolves_nested_includes_against_including_file() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let main = write(tmp.path(), "main.cpp", "#include \"lib/util.h\"\nint main(){}\n");
    // detail.h sits next to util.h, not next to main.cpp
    write(tmp.path(), "lib/util.h", "#include \"detail.h\"\nint util();\n");
    write(tmp.path(), "lib/detail.h", "int detail();\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![main], &out)?;

    assert_eq!(
        fs::read_to_string(&out)?,
        "int detail();\nint util();\nint main(){}\n"
    );
    Ok(())
}

#[test]
fn diamond_include_is_emitted_once_at_first_encounter() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(
        tmp.path(),
        "a.cpp",
        "#include \"b.h\"\n#include \"c.h\"\nint main(){}\n",
    );
    write(tmp.path(), "b.h", "#include \"d.h\"\nint b();\n");
    write(tmp.path(), "c.h", "#include \"d.h\"\nint c();\n");
    write(tmp.path(), "d.h", "int d();\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a], &out)?;

    assert_eq!(
        fs::read_to_string(&out)?,
        "int d();\nint b();\nint c();\nint main(){}\n"
    );
    Ok(())
}

#[test]
fn include_cycle_terminates_with_each_body_once() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.h", "int a;\n#include \"b.h\"\n");
    write(tmp.path(), "b.h", "#include \"a.h\"\nint b;\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a], &out)?;

    assert_eq!(fs::read_to_string(&out)?, "int a;\nint b;\n");
    Ok(())
}

#[test]
fn self_include_is_skipped() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.h", "#include \"a.h\"\nint a;\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a], &out)?;

    assert_eq!(fs::read_to_string(&out)?, "int a;\n");
    Ok(())
}

#[test]
fn duplicate_entry_files_collapse() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "int main(){}\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a.clone(), a], &out)?;

    assert_eq!(fs::read_to_string(&out)?, "int main(){}\n");
    Ok(())
}

#[test]
fn system_includes_pass_through_verbatim() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(
        tmp.path(),
        "a.cpp",
        "#include <vector>\n#include <iostream>\nint main(){}\n",
    );

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a], &out)?;

    assert_eq!(
        fs::read_to_string(&out)?,
        "#include <vector>\n#include <iostream>\nint main(){}\n"
    );
    Ok(())
}

#[test]
fn crlf_lines_are_normalized() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "#include \"b.h\"\r\nint main(){}\r\n");
    write(tmp.path(), "b.h", "int helper();\r\n");

    let out = tmp.path().join("out.cpp");
    pack_to(vec![a], &out)?;

    assert_eq!(fs::read_to_string(&out)?, "int helper();\nint main(){}\n");
    Ok(())
}

#[test]
fn testlib_is_linked_not_inlined() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let checker = write(
        tmp.path(),
        "src/checker.cpp",
        "#include \"testlib.h\"\nint main(){}\n",
    );
    write(tmp.path(), "src/testlib.h", "void registerTestlibCmd();\n");

    let out = tmp.path().join("submissions/checker.cpp");
    pack_to(vec![checker], &out)?;

    let packed = fs::read_to_string(&out)?;
    assert_eq!(packed, "#include \"testlib.h\"\nint main(){}\n");
    assert!(!packed.contains("registerTestlibCmd"));

    let link = tmp.path().join("submissions").join(TESTLIB_HEADER);
    let target = fs::read_link(&link)?;
    assert_eq!(target, Path::new("../src/testlib.h"));
    // the link must resolve to the real header from where it was placed
    assert_eq!(
        fs::read_to_string(&link)?,
        "void registerTestlibCmd();\n"
    );
    Ok(())
}

#[test]
fn testlib_directive_is_not_deduplicated() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let r#gen = write(tmp.path(), "gen.cpp", "#include \"testlib.h\"\nint gen;\n");
    let val = write(tmp.path(), "val.cpp", "#include \"testlib.h\"\nint val;\n");
    write(tmp.path(), "testlib.h", "void testlib();\n");

    let out = tmp.path().join("submissions/tools.cpp");
    pack_to(vec![r#gen, val], &out)?;

    // every directive line survives; only the symlink side effect is one-shot
    assert_eq!(
        fs::read_to_string(&out)?,
        "#include \"testlib.h\"\nint gen;\n#include \"testlib.h\"\nint val;\n"
    );
    assert!(
        tmp.path()
            .join("submissions")
            .join(TESTLIB_HEADER)
            .symlink_metadata()?
            .file_type()
            .is_symlink()
    );
    Ok(())
}

#[test]
fn repacking_over_existing_link_succeeds() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "#include \"testlib.h\"\nint main(){}\n");
    write(tmp.path(), "testlib.h", "void testlib();\n");

    let out = tmp.path().join("submissions/a.cpp");
    pack_to(vec![a.clone()], &out)?;
    pack_to(vec![a], &out)?;
    Ok(())
}

#[test]
fn missing_include_is_fatal() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "#include \"missing.h\"\nint main(){}\n");

    let out = tmp.path().join("out.cpp");
    let err = pack_to(vec![a], &out).unwrap_err();
    match err {
        PackError::OpenSource { path, .. } => {
            assert!(path.ends_with("missing.h"), "unexpected path {path:?}")
        },
        other => panic!("expected OpenSource, got {other:?}"),
    }
    Ok(())
}

#[test]
fn missing_entry_file_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out.cpp");
    let err = pack_to(vec![tmp.path().join("nope.cpp")], &out).unwrap_err();
    assert!(matches!(err, PackError::OpenSource { .. }));
}

#[test]
fn packing_twice_is_deterministic() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(
        tmp.path(),
        "a.cpp",
        "#include \"b.h\"\n#include \"c.h\"\nint main(){}\n",
    );
    write(tmp.path(), "b.h", "#include \"d.h\"\nint b();\n");
    write(tmp.path(), "c.h", "#include \"d.h\"\nint c();\n");
    write(tmp.path(), "d.h", "int d();\n");

    let first = tmp.path().join("one/out.cpp");
    let second = tmp.path().join("two/out.cpp");
    pack_to(vec![a.clone()], &first)?;
    pack_to(vec![a], &second)?;

    assert_eq!(fs::read(&first)?, fs::read(&second)?);
    Ok(())
}

#[test]
fn truncates_preexisting_output() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "int main(){}\n");
    let out = write(tmp.path(), "out.cpp", "stale contents from a previous run\n");

    pack_to(vec![a], &out)?;

    assert_eq!(fs::read_to_string(&out)?, "int main(){}\n");
    Ok(())
}

#[test]
fn creates_missing_output_directory() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let a = write(tmp.path(), "a.cpp", "int main(){}\n");

    let out = tmp.path().join("deeply/nested/out.cpp");
    pack_to(vec![a], &out)?;

    assert!(out.try_exists()?);
    Ok(())
}
