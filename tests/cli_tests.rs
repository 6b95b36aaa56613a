use assert_fs::TempDir;
use assert_fs::prelude::*;
use common::command::run_conflicts_command;
use common::file::workdir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
fn new_files_are_listed_without_a_prompt(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("a")?;

    run_conflicts_command(workdir.path(), &["check", "--dest", "out", "src/a.txt"])
        .assert()
        .success()
        .stdout("src/a.txt\n")
        .stderr(predicate::str::contains("want to overwrite").not());

    Ok(())
}

#[rstest]
fn accepted_conflicts_are_written_with_write(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("new")?;
    workdir.child("out/a.txt").write_str("old")?;

    run_conflicts_command(
        workdir.path(),
        &["check", "--dest", "out", "--write", "src/a.txt"],
    )
    .write_stdin("y\n")
    .assert()
    .success()
    .stdout("src/a.txt\n")
    .stderr(predicate::str::contains(
        "? File exists, want to overwrite src/a.txt? (ynaxdh)",
    ))
    .stderr(predicate::str::contains("✔ Overwriting src/a.txt"));

    workdir.child("out/a.txt").assert("new");

    Ok(())
}

#[rstest]
fn declined_conflicts_are_left_alone(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("new")?;
    workdir.child("out/a.txt").write_str("old")?;

    run_conflicts_command(
        workdir.path(),
        &["check", "--dest", "out", "--write", "src/a.txt"],
    )
    .write_stdin("n\n")
    .assert()
    .success()
    .stdout("")
    .stderr(predicate::str::contains("⚠ Skipping src/a.txt"));

    workdir.child("out/a.txt").assert("old");

    Ok(())
}

#[rstest]
fn diff_answer_prints_the_diff_and_asks_again(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("one\ntwo\n")?;
    workdir.child("out/a.txt").write_str("one\nthree\n")?;

    run_conflicts_command(workdir.path(), &["check", "--dest", "out", "src/a.txt"])
        .write_stdin("d\ny\n")
        .assert()
        .success()
        .stdout("src/a.txt\n")
        .stderr(predicate::str::contains("Diff comparison of src/a.txt"))
        .stderr(predicate::str::contains("-three\n+two\n"));

    Ok(())
}

#[rstest]
fn directories_are_expanded(workdir: TempDir) -> TestResult {
    workdir.child("src/b.txt").write_str("b")?;
    workdir.child("src/a.txt").write_str("a")?;

    run_conflicts_command(workdir.path(), &["check", "--dest", "out", "src"])
        .assert()
        .success()
        .stdout("src/a.txt\nsrc/b.txt\n");

    Ok(())
}

#[rstest]
fn identical_files_are_skipped(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("same")?;
    workdir.child("out/a.txt").write_str("same")?;

    run_conflicts_command(workdir.path(), &["check", "--dest", "out", "src/a.txt"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("file is identical"));

    Ok(())
}

#[rstest]
fn overwrite_flag_never_asks(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("new")?;
    workdir.child("out/a.txt").write_str("old")?;

    run_conflicts_command(
        workdir.path(),
        &["check", "--dest", "out", "--overwrite", "--write", "src/a.txt"],
    )
    .assert()
    .success()
    .stdout("src/a.txt\n");

    workdir.child("out/a.txt").assert("new");

    Ok(())
}

#[rstest]
fn closed_input_fails_the_batch(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("new")?;
    workdir.child("out/a.txt").write_str("old")?;

    run_conflicts_command(workdir.path(), &["check", "--dest", "out", "src/a.txt"])
        .write_stdin("")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("input closed"));

    Ok(())
}

#[rstest]
fn abort_writes_nothing(workdir: TempDir) -> TestResult {
    workdir.child("src/a.txt").write_str("new a")?;
    workdir.child("src/b.txt").write_str("new b")?;
    workdir.child("out/a.txt").write_str("old a")?;
    workdir.child("out/b.txt").write_str("old b")?;

    run_conflicts_command(
        workdir.path(),
        &["check", "--dest", "out", "--write", "src/a.txt", "src/b.txt"],
    )
    .write_stdin("y\nx\n")
    .assert()
    .success()
    .stdout("")
    .stderr(predicate::str::contains("✖ Stopping, no files will be overwritten."));

    workdir.child("out/a.txt").assert("old a");
    workdir.child("out/b.txt").assert("old b");

    Ok(())
}

#[rstest]
fn diff_subcommand_prints_the_text_diff(workdir: TempDir) -> TestResult {
    workdir.child("old.txt").write_str("a1\na2\na3\na4")?;
    workdir.child("new.txt").write_str("a1\nb2\nb3\na4")?;

    run_conflicts_command(workdir.path(), &["diff", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout("+ added\n- removed\n\n a1\n-a2\n-a3\n+b2\n+b3\n a4\n");

    Ok(())
}

#[test]
fn check_requires_a_destination() -> TestResult {
    let dir = TempDir::new()?;

    run_conflicts_command(dir.path(), &["check", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dest"));

    Ok(())
}
