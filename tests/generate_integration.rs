//! Integration tests for the generation pipeline

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use probin_gen::{
    expand_template, generate, resolve_files, run, DataType, DeclarationError, GenerateConfig,
    GenerateError, Job, Manifest, ParameterSet, FAILURE_STUB,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn job_in(dir: &Path, files: &[&str]) -> Job {
    Job {
        template: fixture("probin.template"),
        parameter_files: files.iter().map(|f| fixture(f)).collect(),
        output: dir.join("extern.F90"),
        config: GenerateConfig::new()
            .with_namelist_name("extern")
            .with_cxx_prefix(dir.join("extern").to_string_lossy()),
    }
}

#[test]
fn test_override_moves_parameter_last() {
    let params = resolve_files(&[fixture("_parameters"), fixture("problem_parameters")])
        .expect("Should resolve");

    assert_eq!(
        params.names(),
        vec!["small_dt", "octant", "max_step", "xlo_boundary_type"]
    );
    let max_step = params.get("max_step").expect("max_step present");
    assert_eq!(max_step.default_value, "5");
    assert_eq!(max_step.priority, 10);
    // Equal priority: the first declaration wins
    assert_eq!(
        params.get("small_dt").map(|p| p.default_value.as_str()),
        Some("1.d-10")
    );
    assert_eq!(
        params.get("octant").map(|p| p.dtype.clone()),
        Some(DataType::Logical)
    );
}

#[test]
fn test_file_order_matters() {
    // Reversed: the priority-10 declaration comes first and the later one loses
    let params = resolve_files(&[fixture("problem_parameters"), fixture("_parameters")])
        .expect("Should resolve");
    assert_eq!(
        params.names(),
        vec!["max_step", "xlo_boundary_type", "small_dt", "octant"]
    );
    assert_eq!(
        params.get("small_dt").map(|p| p.default_value.as_str()),
        Some("1.d-4")
    );
}

#[test]
fn test_declarations_and_commandline_only() {
    let params = resolve_files(&[fixture("_parameters")]).expect("Should resolve");
    let out = expand_template(
        "@@declarations@@\n@@commandline@@\n",
        &params,
        &GenerateConfig::default(),
    )
    .expect("Should expand");

    let decls: Vec<&str> = out
        .text
        .lines()
        .filter(|l| l.contains(", save, public ::"))
        .collect();
    assert_eq!(
        decls,
        vec![
            "integer, save, public :: max_step = 1",
            "real (kind=rt), save, public :: small_dt = 1.d-10",
            "logical, save, public :: octant = .false.",
        ]
    );

    let cases: Vec<&str> = out.text.lines().filter(|l| l.starts_with("case")).collect();
    assert_eq!(
        cases,
        vec!["case ('--max_step')", "case ('--small_dt')", "case ('--octant')"]
    );
}

#[test]
fn test_empty_parameter_set_stays_valid() {
    let out = expand_template(
        "  @@declarations@@\n  @@namelist@@\n  @@acc@@\n",
        &ParameterSet::new(),
        &GenerateConfig::default().with_namelist_name("extern"),
    )
    .expect("Should expand");
    let body: Vec<&str> = out
        .text
        .lines()
        .filter(|l| !l.starts_with('!') && !l.is_empty())
        .collect();
    assert_eq!(
        body,
        vec![
            "  integer, save, public :: a_dummy_var = 0",
            "  namelist /extern/ a_dummy_var",
        ]
    );
}

#[test]
fn test_run_writes_all_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = job_in(dir.path(), &["_parameters", "problem_parameters"]);

    let artifacts = run(&job).expect("Should generate");
    assert!(artifacts.warnings.is_empty());

    let primary = fs::read_to_string(dir.path().join("extern.F90")).expect("primary written");
    assert!(primary.starts_with("\n! DO NOT EDIT THIS FILE!!!\n"));
    assert!(!primary.contains("@@"));
    assert!(primary.contains("  namelist /extern/ max_step\n"));
    assert!(primary.contains("  !$acc update &\n  !$acc device(small_dt, octant, max_step) &\n  !$acc device(xlo_boundary_type)\n"));
    assert!(primary.contains("     case ('--xlo_boundary_type')\n"));
    assert!(primary.contains("  max_step = 5\n"));

    let foreign = fs::read_to_string(dir.path().join("extern_parameters_F.H")).expect("_F.H");
    assert!(foreign.contains("  void get_f90_xlo_boundary_type_len(int* slen);\n"));
    assert!(foreign.contains("  void get_f90_max_step(int* max_step);\n"));

    let header = fs::read_to_string(dir.path().join("extern_parameters.H")).expect(".H");
    assert!(header.contains("  void init_extern_parameters();\n"));
    assert!(header.contains("  extern std::string xlo_boundary_type;\n"));

    let source = fs::read_to_string(dir.path().join("extern_parameters.cpp")).expect(".cpp");
    assert!(source.contains("    get_f90_xlo_boundary_type_len(&slen);\n"));
    assert!(source.contains("    get_f90_octant(&octant);\n"));
    // Globals appear in resolved order
    let small_dt = source.find("amrex::Real small_dt;").expect("small_dt global");
    let max_step = source.find("int max_step;").expect("max_step global");
    assert!(small_dt < max_step);
}

#[test]
fn test_managed_mode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut job = job_in(dir.path(), &["_parameters", "problem_parameters"]);
    job.config = job.config.with_managed(true);

    let artifacts = generate(&job).expect("Should generate");
    let primary = &artifacts.primary.contents;
    assert!(primary.contains("  real (kind=rt), allocatable, public :: small_dt\n"));
    assert!(primary.contains("  character (len=256), public :: xlo_boundary_type\n"));
    assert!(primary.contains("  attributes(managed) :: max_step\n"));
    assert!(primary.contains("  allocate(octant)\n"));
    assert!(primary.contains("  deallocate(small_dt)\n"));
    assert!(!primary.contains("allocate(xlo_boundary_type)"));
    assert!(!primary.contains("attributes(managed) :: xlo_boundary_type"));
}

#[test]
fn test_malformed_file_writes_stub() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = job_in(dir.path(), &["_parameters", "malformed_parameters"]);
    fs::write(&job.output, "stale contents").expect("seed stale output");

    let err = run(&job).unwrap_err();
    match &err {
        GenerateError::Declaration(DeclarationError::MissingFields { line, found, .. }) => {
            assert_eq!(*line, 2);
            assert_eq!(*found, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.report().contains("do_reflux"));
    assert_eq!(fs::read_to_string(&job.output).expect("stub"), FAILURE_STUB);
    assert!(!dir.path().join("extern_parameters.H").exists());
}

#[test]
fn test_missing_parameter_file_writes_stub() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = job_in(dir.path(), &["_parameters", "does_not_exist"]);

    let err = run(&job).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Declaration(DeclarationError::Io { .. })
    ));
    assert!(err.to_string().contains("does_not_exist"));
    assert_eq!(fs::read_to_string(&job.output).expect("stub"), FAILURE_STUB);
}

#[test]
fn test_missing_template_writes_stub() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut job = job_in(dir.path(), &["_parameters"]);
    job.template = dir.path().join("missing.template");

    let err = run(&job).unwrap_err();
    assert!(matches!(err, GenerateError::TemplateRead { .. }));
    assert_eq!(fs::read_to_string(&job.output).expect("stub"), FAILURE_STUB);
}

#[test]
fn test_unknown_type_only_skips_its_print_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let odd = dir.path().join("odd_parameters");
    fs::write(&odd, "gamma complex (1.0,0.0)\n").expect("write fixture");
    let template = dir.path().join("printing.template");
    fs::write(&template, "  @@namelist@@\n  @@printing@@\n").expect("write template");
    let mut job = job_in(dir.path(), &["_parameters"]);
    job.template = template;
    job.parameter_files.push(odd);

    let artifacts = run(&job).expect("Should generate");
    assert_eq!(artifacts.warnings.len(), 1);
    assert_eq!(artifacts.warnings[0].parameter, "gamma");

    let primary = fs::read_to_string(&job.output).expect("primary");
    assert!(primary.contains("  namelist /extern/ gamma\n"));
    assert!(primary.contains(" \"max_step\", max_step\n"));
    assert!(!primary.contains("\"gamma\""));

    let header = fs::read_to_string(dir.path().join("extern_parameters.H")).expect(".H");
    assert!(header.contains("  extern AMREX_GPU_MANAGED int gamma;\n"));
}

#[test]
fn test_indented_comment_writes_stub() {
    let dir = tempfile::tempdir().expect("tempdir");
    let commented = dir.path().join("commented_parameters");
    fs::write(&commented, "# fine\nalpha real 1.0\n    # not fine\n").expect("write fixture");
    let mut job = job_in(dir.path(), &["_parameters"]);
    job.parameter_files.push(commented);

    let err = run(&job).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Declaration(DeclarationError::MissingFields { line: 3, found: 0, .. })
    ));
    assert_eq!(fs::read_to_string(&job.output).expect("stub"), FAILURE_STUB);
}

#[test]
fn test_manifest_job() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::copy(fixture("_parameters"), dir.path().join("_parameters")).expect("copy params");
    fs::copy(fixture("probin.template"), dir.path().join("probin.template"))
        .expect("copy template");
    let manifest_path = dir.path().join("probin.toml");
    fs::write(
        &manifest_path,
        r#"
template = "probin.template"
output = "probin.F90"
namelist = "extern"
cxx_prefix = "runtime"
parameter_files = ["_parameters"]
"#,
    )
    .expect("write manifest");

    let job = Manifest::from_file(&manifest_path)
        .expect("Should load")
        .into_job()
        .expect("Should build job");
    run(&job).expect("Should generate");

    assert!(dir.path().join("probin.F90").exists());
    let header = fs::read_to_string(dir.path().join("runtime_parameters.H")).expect(".H");
    assert!(header.contains("#ifndef _runtime_parameters_H_\n"));
    assert!(header.contains("  void init_runtime_parameters();\n"));
}
