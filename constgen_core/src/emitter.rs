//! C source emission for the CPython extension module.
//!
//! Each class becomes one `add_<Class>` routine that builds a list of
//! `(name, value)` tuples, hands it to `enum.Enum`/`enum.Flag`, installs the
//! result on the module and attaches its doc string. Every failure jumps to a
//! single `out:` label that drops whatever the routine still owns.

use crate::config::GeneratorConfig;
use crate::registry::ConstantClass;
use crate::scanner::Constant;
use std::borrow::Cow;

/// Writes the notice and the include directive.
pub fn emit_preamble(output: &mut String, config: &GeneratorConfig) {
    output.push_str(&format!(
        "/* Generated by {}. */\n\n#include \"{}\"\n\n",
        config.generated_by, config.include
    ));
}

/// Writes one `PyObject *<Class>_class;` per class.
pub fn emit_declarations(output: &mut String, classes: &[ConstantClass]) {
    for class in classes {
        output.push_str(&format!("PyObject *{}_class;\n", class.name));
    }
}

/// Writes the `add_<Class>` construction routine for one class.
pub fn emit_constant_class(
    output: &mut String,
    class: &ConstantClass,
    constants: &[Constant],
    config: &GeneratorConfig,
) {
    let name = class.name;

    output.push_str(&format!(
        "\nstatic int add_{name}(PyObject *m, PyObject *enum_module)\n\
         {{\n\
         \tPyObject *tmp, *item;\n\
         \tint ret = -1;\n\
         \n\
         \ttmp = PyList_New({len});\n\
         \tif (!tmp)\n\
         \t\tgoto out;\n",
        len = constants.len()
    ));

    for (i, constant) in constants.iter().enumerate() {
        output.push_str(&format!(
            "\titem = Py_BuildValue(\"sK\", \"{}\", (unsigned long long){});\n\
             \tif (!item)\n\
             \t\tgoto out;\n\
             \tPyList_SET_ITEM(tmp, {i}, item);\n",
            constant.name,
            cast_operand(&constant.value)
        ));
    }

    output.push_str(&format!(
        "\t{name}_class = PyObject_CallMethod(enum_module, \"{kind}\", \"sO\", \"{name}\", tmp);\n\
         \tif (!{name}_class)\n\
         \t\tgoto out;\n\
         \tif (PyModule_AddObject(m, \"{name}\", {name}_class) == -1) {{\n\
         \t\tPy_CLEAR({name}_class);\n\
         \t\tgoto out;\n\
         \t}}\n\
         \tPy_DECREF(tmp);\n\
         \ttmp = PyUnicode_FromString({prefix}_{name}_DOC);\n\
         \tif (!tmp)\n\
         \t\tgoto out;\n\
         \tif (PyObject_SetAttrString({name}_class, \"__doc__\", tmp) == -1)\n\
         \t\tgoto out;\n\
         \n\
         \tret = 0;\n\
         out:\n\
         \tPy_XDECREF(tmp);\n\
         \treturn ret;\n\
         }}\n",
        kind = class.kind,
        prefix = config.doc_prefix,
    ));
}

/// Parenthesizes `value` unless it is a single token (identifier or number)
/// or already enclosed in one pair of parentheses, so the cast applies to the
/// whole expression.
fn cast_operand(value: &str) -> Cow<'_, str> {
    let single_token = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if single_token || is_enclosed(value) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("({value})"))
    }
}

/// True if the parenthesis opening `value` is the one closing it.
fn is_enclosed(value: &str) -> bool {
    if !value.starts_with('(') {
        return false;
    }
    let mut depth = 0usize;
    for (i, b) in value.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == value.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// Writes the dispatcher that imports the enum module once and runs every
/// `add_<Class>` routine, stopping at the first failure.
pub fn emit_dispatcher(output: &mut String, classes: &[ConstantClass], config: &GeneratorConfig) {
    output.push_str(&format!(
        "\nint {}(PyObject *m)\n\
         {{\n\
         \tPyObject *enum_module;\n\
         \tint ret;\n\
         \n\
         \tenum_module = PyImport_ImportModule(\"{}\");\n\
         \tif (!enum_module)\n\
         \t\treturn -1;\n\
         \n",
        config.dispatcher, config.enum_module
    ));

    if classes.is_empty() {
        output.push_str("\tret = 0;\n");
    } else {
        let last = classes.len() - 1;
        for (i, class) in classes.iter().enumerate() {
            output.push_str(if i == 0 { "\tif (" } else { "\t    " });
            output.push_str(&format!("add_{}(m, enum_module) == -1", class.name));
            output.push_str(if i == last { ")\n" } else { " ||\n" });
        }
        output.push_str("\t\tret = -1;\n\telse\n\t\tret = 0;\n");
    }

    output.push_str("\tPy_DECREF(enum_module);\n\treturn ret;\n}\n");
}
