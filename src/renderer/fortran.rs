//! Fortran emission rules, one per placeholder keyword

use crate::parser::ast::{DataType, Parameter, ParameterSet};
use crate::template::Keyword;

use super::{fortran_type, Block, EmitError, GenerateConfig, DUMMY_VARIABLE};

/// Names per `!$acc device(...)` clause before continuing on a new line
const ACC_NAMES_PER_LINE: usize = 3;

/// Generate the block for one placeholder
pub fn emit(
    keyword: Keyword,
    params: &ParameterSet,
    indent: &str,
    config: &GenerateConfig,
) -> Result<Block, EmitError> {
    let mut block = Block::new(indent);
    match keyword {
        Keyword::Declarations => declarations(&mut block, params, config)?,
        Keyword::CudaAttributes => managed_only(&mut block, params, config, |n| {
            format!("attributes(managed) :: {}", n)
        }),
        Keyword::Allocations => {
            managed_only(&mut block, params, config, |n| format!("allocate({})", n))
        }
        Keyword::Deallocations => {
            managed_only(&mut block, params, config, |n| format!("deallocate({})", n))
        }
        Keyword::Initialize => {
            if config.managed {
                defaults(&mut block, params);
            }
        }
        Keyword::Namelist => namelist(&mut block, params, &config.namelist_name),
        Keyword::Defaults => defaults(&mut block, params),
        Keyword::Commandline => commandline(&mut block, params),
        Keyword::Printing => printing(&mut block, params),
        Keyword::Acc => acc(&mut block, params),
        Keyword::CxxGets => accessors(&mut block, params)?,
    }
    Ok(block)
}

fn declarations(
    block: &mut Block,
    params: &ParameterSet,
    config: &GenerateConfig,
) -> Result<(), EmitError> {
    for p in params {
        let decl = fortran_type(p, "declarations")?;
        if !config.managed {
            block.line(format!(
                "{}, save, public :: {} = {}",
                decl, p.name, p.default_value
            ));
        } else if p.dtype.is_character() {
            block.line(format!("{}, public :: {}", decl, p.name));
        } else {
            block.line(format!("{}, allocatable, public :: {}", decl, p.name));
        }
        block.line(format!("!$acc declare create({})", p.name));
    }

    if params.is_empty() {
        block.line(format!("integer, save, public :: {} = 0", DUMMY_VARIABLE));
    }
    Ok(())
}

/// Per-variable statements for heap-managed storage; strings are never managed
fn managed_only(
    block: &mut Block,
    params: &ParameterSet,
    config: &GenerateConfig,
    statement: impl Fn(&str) -> String,
) {
    if !config.managed {
        return;
    }
    for p in params.iter().filter(|p| !p.dtype.is_character()) {
        block.line(statement(&p.name));
    }
}

fn namelist(block: &mut Block, params: &ParameterSet, group: &str) {
    for p in params {
        block.line(format!("namelist /{}/ {}", group, p.name));
    }
    if params.is_empty() {
        block.line(format!("namelist /{}/ {}", group, DUMMY_VARIABLE));
    }
}

fn defaults(block: &mut Block, params: &ParameterSet) {
    for p in params {
        block.line(format!("{} = {}", p.name, p.default_value));
    }
}

fn commandline(block: &mut Block, params: &ParameterSet) {
    for p in params {
        block.line(format!("case ('--{}')", p.name));
        block.line("   farg = farg + 1");
        if p.dtype.is_character() {
            block.line(format!(
                "   call get_command_argument(farg, value = {})",
                p.name
            ));
        } else {
            // List-directed read does the type conversion
            block.line("   call get_command_argument(farg, value = fname)");
            block.line(format!("   read(fname, *) {}", p.name));
        }
    }
}

fn printing(block: &mut Block, params: &ParameterSet) {
    // Statement labels must start in column 0
    block.raw(r#"100 format (1x, a3, 2x, a32, 1x, "=", 1x, a)"#);
    block.raw(r#"101 format (1x, a3, 2x, a32, 1x, "=", 1x, i10)"#);
    block.raw(r#"102 format (1x, a3, 2x, a32, 1x, "=", 1x, g20.10)"#);
    block.raw(r#"103 format (1x, a3, 2x, a32, 1x, "=", 1x, l)"#);

    for p in params {
        let (label, value) = match p.dtype {
            DataType::Character => (100, format!("trim({})", p.name)),
            DataType::Integer => (101, p.name.clone()),
            DataType::Real => (102, p.name.clone()),
            DataType::Logical => (103, p.name.clone()),
            DataType::Other(_) => {
                block.warn(p, format!("invalid datatype '{}', not printed", p.dtype));
                continue;
            }
        };
        let compare = if p.dtype == DataType::Logical {
            ".eqv."
        } else {
            "=="
        };

        block.blank();
        block.line(format!("ltest = {} {} {}", p.name, compare, p.default_value));
        block.line(format!(
            r#"write (unit,{}) merge("   ", "[*]", ltest), &"#,
            label
        ));
        block.raw(format!(r#" "{}", {}"#, p.name, value));
    }
}

fn acc(block: &mut Block, params: &ParameterSet) {
    if params.is_empty() {
        return;
    }
    block.line("!$acc update &");
    let groups: Vec<&[Parameter]> = params.as_slice().chunks(ACC_NAMES_PER_LINE).collect();
    for (i, group) in groups.iter().enumerate() {
        let names: Vec<&str> = group.iter().map(|p| p.name.as_str()).collect();
        let continuation = if i + 1 == groups.len() { "" } else { " &" };
        block.line(format!("!$acc device({}){}", names.join(", "), continuation));
    }
}

/// `bind(C)` getters that copy each value out to a C++ caller
fn accessors(block: &mut Block, params: &ParameterSet) -> Result<(), EmitError> {
    for p in params {
        let n = &p.name;
        match p.dtype {
            DataType::Character => {
                block.line(format!(
                    r#"subroutine get_f90_{n}_len(slen) bind(C, name="get_f90_{n}_len")"#
                ));
                block.line("   integer, intent(inout) :: slen");
                block.line(format!("   slen = len(trim({n}))"));
                block.line(format!("end subroutine get_f90_{n}_len"));
                block.blank();

                block.line(format!(
                    r#"subroutine get_f90_{n}({n}_in) bind(C, name="get_f90_{n}")"#
                ));
                block.line(format!("   character(kind=c_char) :: {n}_in(*)"));
                block.line("   integer :: n");
                block.line(format!("   do n = 1, len(trim({n}))"));
                block.line(format!("      {n}_in(n) = {n}(n:n)"));
                block.line("   end do");
                block.line(format!("   {n}_in(len(trim({n}))+1) = char(0)"));
                block.line(format!("end subroutine get_f90_{n}"));
                block.blank();
            }
            DataType::Logical => {
                block.line(format!(
                    r#"subroutine get_f90_{n}({n}_in) bind(C, name="get_f90_{n}")"#
                ));
                block.line(format!("   integer, intent(inout) :: {n}_in"));
                block.line(format!("   {n}_in = 0"));
                block.line(format!("   if ({n}) then"));
                block.line(format!("      {n}_in = 1"));
                block.line("   endif");
                block.line(format!("end subroutine get_f90_{n}"));
                block.blank();
            }
            _ => {
                let decl = fortran_type(p, "cxx_gets")?;
                block.line(format!(
                    r#"subroutine get_f90_{n}({n}_in) bind(C, name="get_f90_{n}")"#
                ));
                block.line(format!("   {decl}, intent(inout) :: {n}_in"));
                block.line(format!("   {n}_in = {n}"));
                block.line(format!("end subroutine get_f90_{n}"));
                block.blank();
            }
        }
    }
    Ok(())
}
