//! C++ side of the bridge: accessor prototypes, global declarations and
//! the init routine that copies every value out of Fortran.

use crate::parser::ast::{DataType, ParameterSet};

use super::{c_type, cxx_type, GenerateConfig};

/// `<prefix>_parameters_F.H`: prototypes of the `get_f90_*` accessors
///
/// Plain C declarations inside `extern "C"`, so the header also compiles
/// as C.
pub fn foreign_header(params: &ParameterSet, config: &GenerateConfig) -> String {
    let guard = format!("_{}_parameters_F_H_", config.prefix_basename());
    let mut out = String::new();
    out.push_str(&format!("\n#ifndef {guard}\n#define {guard}\n"));
    out.push_str("#include <AMReX_REAL.H>\n\n");
    out.push_str("#ifdef __cplusplus\nextern \"C\"\n{\n#endif\n\n");

    for p in params {
        let n = &p.name;
        match p.dtype {
            DataType::Character => {
                out.push_str(&format!("  void get_f90_{n}(char* {n});\n\n"));
                out.push_str(&format!("  void get_f90_{n}_len(int* slen);\n\n"));
            }
            _ => {
                out.push_str(&format!("  void get_f90_{n}({}* {n});\n\n", c_type(p)));
            }
        }
    }

    out.push_str("#ifdef __cplusplus\n}\n#endif\n\n#endif\n");
    out
}

/// `<prefix>_parameters.H`: the globals C++ code reads, plus the init entry point
pub fn public_header(params: &ParameterSet, config: &GenerateConfig) -> String {
    let base = config.prefix_basename();
    let guard = format!("_{}_parameters_H_", base);
    let mut out = String::new();
    out.push_str(&format!("\n#ifndef {guard}\n#define {guard}\n"));
    out.push_str("#include <string>\n#include <AMReX_BLFort.H>\n\n");
    out.push_str(&format!("  void init_{base}_parameters();\n\n"));

    for p in params {
        if p.dtype.is_character() {
            out.push_str(&format!("  extern std::string {};\n\n", p.name));
        } else {
            out.push_str(&format!(
                "  extern AMREX_GPU_MANAGED {} {};\n\n",
                cxx_type(p),
                p.name
            ));
        }
    }

    out.push_str("#endif\n");
    out
}

/// `<prefix>_parameters.cpp`: storage for the globals and `init_<base>_parameters()`
///
/// Strings are fetched length first, then copied into a scratch buffer
/// with room for the terminator. Logicals arrive as 0/1 ints.
pub fn init_source(params: &ParameterSet, config: &GenerateConfig) -> String {
    let base = config.prefix_basename();
    let mut out = String::new();
    out.push_str(&format!("#include <{base}_parameters.H>\n"));
    out.push_str(&format!("#include <{base}_parameters_F.H>\n"));
    out.push_str("#include <vector>\n\n");

    for p in params {
        if p.dtype.is_character() {
            out.push_str(&format!("  std::string {};\n\n", p.name));
        } else {
            out.push_str(&format!("  AMREX_GPU_MANAGED {} {};\n\n", cxx_type(p), p.name));
        }
    }

    out.push('\n');
    out.push_str(&format!("  void init_{base}_parameters() {{\n"));
    out.push_str("    int slen = 0;\n\n");

    for p in params {
        let n = &p.name;
        if p.dtype.is_character() {
            out.push_str(&format!("    get_f90_{n}_len(&slen);\n"));
            out.push_str(&format!("    std::vector<char> _{n}(slen + 1);\n"));
            out.push_str(&format!("    get_f90_{n}(_{n}.data());\n"));
            out.push_str(&format!("    {n} = std::string(_{n}.data());\n\n"));
        } else {
            out.push_str(&format!("    get_f90_{n}(&{n});\n\n"));
        }
    }

    out.push_str("  }\n");
    out
}
