use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doxyman")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Copy the named fixtures into a fresh input directory, so tests can
/// control exactly which referenced files exist.
fn input_dir(fixtures: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in fixtures {
        fs::copy(fixture_path(name), dir.path().join(name)).unwrap();
    }
    dir
}

// -- page generation --

#[test]
fn generates_summary_and_function_pages() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    assert!(out.path().join("widget.h.3").exists());
    assert!(out.path().join("widget_new.3").exists());
    assert!(out.path().join("widget_free.3").exists());
}

#[test]
fn summary_page_contents() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let summary = fs::read_to_string(out.path().join("widget.h.3")).unwrap();
    assert!(summary.contains(".SH \"NAME\"\nwidget.h \\- Widget construction API.\n"));
    assert!(summary.contains(".B #include <widget.h>\n"));
    // signature list with aligned return types (floor 5 + 1)
    assert!(summary.contains("int   widget_new(struct widget_opts *, int);\n"));
    assert!(summary.contains("void  widget_free(int);\n"));
    // embedded struct from the referenced file
    assert!(summary.contains(".SS \"Widget construction options\"\n"));
    assert!(summary.contains("struct widget_opts {\n"));
    // alphabetical see also
    assert!(summary.contains("\\fIwidget_free\\fP(3), \\fIwidget_new\\fP(3)\n"));
    // one author entry for two authored functions
    assert_eq!(summary.matches("Jane Doe <jane@acme.example>").count(), 1);
    assert!(summary.contains(".SH COPYRIGHT\n.PP\n2026 Acme Corp \n"));
}

#[test]
fn function_page_contents() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("widget_new.3")).unwrap();
    assert!(page.contains("widget_new \\- Create a widget.\n"));
    // aligned parameter columns; the marker hugs the parameter name
    assert!(page.contains("    \\fBstruct widget_opts  *\\fP\\fIopts\\fP,"));
    assert!(page.contains("    \\fBint                  \\fP\\fIflags\\fP\n);\n"));
    // directions and long descriptions joined by name
    assert!(page.contains(".SH PARAMETERS\n.TP\n.B opts\nOptions to apply; must outlive the widget. \n"));
    // struct section resolved from the sibling file
    assert!(page.contains(".SH STRUCTURES\n.SS \"Widget construction options\"\n"));
    assert!(page.contains("\\fIlevel\\fP; // verbosity level \n"));
    // return text plus synthetic retval entries
    assert!(page.contains(".SH RETURN VALUE\n.PP\n0 or a negative error code. \n"));
    assert!(page.contains(".TP\n.B 0\non success. \n"));
    assert!(page.contains(".TP\n.B -1\non allocation failure. \n"));
    // see also: header page, every function, then the function's own refs
    assert!(page.contains(
        "\\fIwidget.h\\fP(3), \\fIwidget_free\\fP(3), \\fIwidget_new\\fP(3), \\fIwidget_free\\fP, \\fIwidget(7)\\fP\n"
    ));
    assert!(page.contains(".SH AUTHORS\n.nf\nJane Doe <jane@acme.example>\n.fi\n"));
}

#[test]
fn function_page_without_details_omits_sections() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("widget_free.3")).unwrap();
    assert!(!page.contains(".SH PARAMETERS"));
    assert!(!page.contains(".SH STRUCTURES"));
    assert!(!page.contains(".SH RETURN VALUE"));
}

// -- switches --

#[test]
fn nosummary_skips_the_summary_page() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--nosummary", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    assert!(!out.path().join("widget.h.3").exists());
    assert!(out.path().join("widget_new.3").exists());
}

#[test]
fn nosort_keeps_declaration_order_in_see_also() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--nosort", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let summary = fs::read_to_string(out.path().join("widget.h.3")).unwrap();
    assert!(summary.contains("\\fIwidget_new\\fP(3), \\fIwidget_free\\fP(3)\n"));
}

#[test]
fn nostructs_drops_the_structures_section() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--nostructs", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("widget_new.3")).unwrap();
    assert!(!page.contains(".SH STRUCTURES"));
}

#[test]
fn nocopyright_drops_the_copyright_section() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--nocopyright", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let summary = fs::read_to_string(out.path().join("widget.h.3")).unwrap();
    assert!(!summary.contains(".SH COPYRIGHT"));
}

#[test]
fn custom_section_number_names_the_pages() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-s", "7", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    assert!(out.path().join("widget_new.7").exists());
    let page = fs::read_to_string(out.path().join("widget_new.7")).unwrap();
    assert!(page.contains(".TH widget_new 7 "));
    assert!(page.contains("\\fIwidget.h\\fP(7)"));
}

#[test]
fn include_prefix_lands_in_the_synopsis() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-i", "acme/", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success();

    let page = fs::read_to_string(out.path().join("widget_new.3")).unwrap();
    assert!(page.contains(".B #include <acme/widget.h>\n"));
}

// -- reference following --

#[test]
fn missing_referenced_file_is_fatal() {
    let input = input_dir(&["widget_8h.xml", "compound.xsd"]);
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(input.path().join("widget_8h.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("referenced file"));
}

#[test]
fn nofollow_succeeds_without_the_referenced_file() {
    let input = input_dir(&["widget_8h.xml", "compound.xsd"]);
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--nofollow", "-o", out.path().to_str().unwrap()])
        .arg(input.path().join("widget_8h.xml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("could not find referenced structure"));

    // the unresolved struct is skipped, the page is still written
    let page = fs::read_to_string(out.path().join("widget_new.3")).unwrap();
    assert!(!page.contains("struct widget_opts {"));
}

// -- validation --

#[test]
fn missing_schema_is_fatal() {
    let input = input_dir(&["widget_8h.xml", "structwidget__opts.xml"]);
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(input.path().join("widget_8h.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("compound.xsd"));
}

#[test]
fn novalidate_skips_the_schema_check() {
    let input = input_dir(&["widget_8h.xml", "structwidget__opts.xml"]);
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--novalidate", "-o", out.path().to_str().unwrap()])
        .arg(input.path().join("widget_8h.xml"))
        .assert()
        .success();
}

#[test]
fn malformed_input_is_fatal() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("broken_8h.xml"), "<doxygen><compounddef>").unwrap();
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--novalidate", "-o", out.path().to_str().unwrap()])
        .arg(input.path().join("broken_8h.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML parse error"));
}

// -- input handling --

#[test]
fn rejects_zero_and_multiple_inputs() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no XML input file specified"));

    cmd()
        .arg(fixture_path("widget_8h.xml"))
        .arg(fixture_path("sparse_8h.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than one input file"));
}

#[test]
fn rejects_nonexistent_input() {
    cmd()
        .arg("nonexistent_8h.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

// -- warnings --

#[test]
fn advisory_warnings_go_to_stderr() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sparse_8h.xml"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "header file sparse.h has no brief description",
        ))
        .stderr(predicate::str::contains(
            "function sparse_tick has no brief description",
        ));
}

#[test]
fn nowarn_suppresses_advisory_warnings() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--nowarn", "-o", out.path().to_str().unwrap()])
        .arg(fixture_path("sparse_8h.xml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("no brief description").not());
}

// -- dump mode --

#[test]
fn dump_mode_writes_the_digest_to_stdout() {
    let cwd = TempDir::new().unwrap();

    cmd()
        .current_dir(cwd.path())
        .arg("-d")
        .arg(fixture_path("widget_8h.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("File: widget.h"))
        .stdout(predicate::str::contains("int widget_new"))
        .stdout(predicate::str::contains("struct widget_opts"));

    // dump mode writes no pages
    assert!(!cwd.path().join("out").exists());
}

// -- determinism --

#[test]
fn two_runs_produce_identical_pages() {
    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();

    for out in [&out1, &out2] {
        cmd()
            .args(["-o", out.path().to_str().unwrap()])
            .arg(fixture_path("widget_8h.xml"))
            .assert()
            .success();
    }

    for page in ["widget.h.3", "widget_new.3", "widget_free.3"] {
        let a = fs::read_to_string(out1.path().join(page)).unwrap();
        let b = fs::read_to_string(out2.path().join(page)).unwrap();
        assert_eq!(a, b, "page {} differs between runs", page);
    }
}
