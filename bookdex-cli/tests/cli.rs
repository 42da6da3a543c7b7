use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are setup incorrectly will cause clap to panic regardless of the
// arguments or options provided.
// Calling help does not require any application logic so if this test fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookdex")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

// An invalid ISBN is rejected by the normalizer before any provider is
// contacted, so this test never touches the network.
#[test]
fn invalid_isbn_is_rejected_with_exit_code_2() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookdex")?;

    cmd.arg("12ab");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicates::str::contains("Invalid ISBN"));

    Ok(())
}

#[test]
fn batch_mode_skips_invalid_isbns_and_writes_an_empty_array(
) -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;
    let input = temp.child("isbn.txt");
    input.write_str("12ab\n\nnot-an-isbn\n")?;
    let output = temp.child("isbn.json");

    let mut cmd = Command::cargo_bin("bookdex")?;
    cmd.arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path());

    cmd.assert().success();
    output.assert("[]");

    Ok(())
}

#[test]
fn missing_input_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = assert_fs::TempDir::new()?;

    let mut cmd = Command::cargo_bin("bookdex")?;
    cmd.arg("--input").arg(temp.child("absent.txt").path());

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicates::str::contains("Failed to read input file"));

    Ok(())
}
