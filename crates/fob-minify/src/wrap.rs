//! Module-wrap and closure-enclose transforms over the merged unit.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, ForStatementInit, ForStatementLeft, Statement,
    VariableDeclaration,
};
use oxc_parser::Parser;
use tracing::debug;

use crate::engine::oxc::script_source_type;
use crate::error::{Error, Result};
use crate::options::EncloseArg;
use crate::unit::CompilationUnit;

impl CompilationUnit {
    /// Wrap the unit so it runs inside a CommonJS-style closure and publishes
    /// `exports` on the global object under `name`.
    ///
    /// With `export_all`, every top-level binding of every source is assigned
    /// onto `exports` before publishing.
    pub fn wrap_commonjs(&mut self, name: &str, export_all: bool) -> Result<()> {
        let exports = if export_all {
            top_level_bindings(self)?
        } else {
            Vec::new()
        };
        debug!(module = name, exports = exports.len(), "wrapping unit as module");

        let mut close = String::from(";\n");
        for binding in &exports {
            close.push_str(&format!("exports[{}] = {binding};\n", js_string(binding)?));
        }
        close.push_str(&format!(
            "global[{}] = exports;\n}}({{}}, (function(){{return this}}())));\n",
            js_string(name)?
        ));

        self.push_wrapper("(function(exports, global){\n".to_string(), close);
        Ok(())
    }

    /// Wrap the unit in an immediately invoked closure binding each argument
    /// expression to a parameter.
    pub fn wrap_enclose(&mut self, args: &[EncloseArg]) {
        let parameters: Vec<&str> = args.iter().map(|a| a.parameter.as_str()).collect();
        let arguments: Vec<&str> = args.iter().map(|a| a.argument.as_str()).collect();
        debug!(parameters = ?parameters, "enclosing unit");

        self.push_wrapper(
            format!("(function({}){{\n", parameters.join(",")),
            format!(";\n}})({});\n", arguments.join(",")),
        );
    }
}

/// Names declared at the top level of the unit's sources, first-seen order,
/// without duplicates.
///
/// Includes `var` declarations nested in top-level blocks and loops, which
/// are global too. Function bodies are not entered.
pub fn top_level_bindings(unit: &CompilationUnit) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();

    for source in unit.sources() {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source.text(), script_source_type()).parse();
        if !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::compilation_failure(source.name(), message));
        }

        for statement in &parsed.program.body {
            match statement {
                Statement::FunctionDeclaration(func) => {
                    if let Some(id) = &func.id {
                        push_unique(&mut names, id.name.as_str());
                    }
                }
                Statement::ClassDeclaration(class) => {
                    if let Some(id) = &class.id {
                        push_unique(&mut names, id.name.as_str());
                    }
                }
                Statement::VariableDeclaration(decl) => collect_declaration(decl, &mut names),
                nested => collect_hoisted_vars(nested, &mut names),
            }
        }
    }

    Ok(names)
}

/// `var` bindings declared anywhere under `statement` outside of functions.
fn collect_hoisted_vars(statement: &Statement<'_>, names: &mut Vec<String>) {
    match statement {
        Statement::VariableDeclaration(decl) if decl.kind.is_var() => {
            collect_declaration(decl, names);
        }
        Statement::BlockStatement(block) => {
            for statement in &block.body {
                collect_hoisted_vars(statement, names);
            }
        }
        Statement::IfStatement(stmt) => {
            collect_hoisted_vars(&stmt.consequent, names);
            if let Some(alternate) = &stmt.alternate {
                collect_hoisted_vars(alternate, names);
            }
        }
        Statement::ForStatement(stmt) => {
            if let Some(ForStatementInit::VariableDeclaration(decl)) = &stmt.init {
                if decl.kind.is_var() {
                    collect_declaration(decl, names);
                }
            }
            collect_hoisted_vars(&stmt.body, names);
        }
        Statement::ForInStatement(stmt) => {
            collect_loop_left(&stmt.left, names);
            collect_hoisted_vars(&stmt.body, names);
        }
        Statement::ForOfStatement(stmt) => {
            collect_loop_left(&stmt.left, names);
            collect_hoisted_vars(&stmt.body, names);
        }
        Statement::WhileStatement(stmt) => collect_hoisted_vars(&stmt.body, names),
        Statement::DoWhileStatement(stmt) => collect_hoisted_vars(&stmt.body, names),
        Statement::LabeledStatement(stmt) => collect_hoisted_vars(&stmt.body, names),
        Statement::WithStatement(stmt) => collect_hoisted_vars(&stmt.body, names),
        Statement::TryStatement(stmt) => {
            let handler = stmt.handler.iter().map(|h| &h.body);
            for block in std::iter::once(&stmt.block).chain(handler).chain(&stmt.finalizer) {
                for statement in &block.body {
                    collect_hoisted_vars(statement, names);
                }
            }
        }
        Statement::SwitchStatement(stmt) => {
            for case in &stmt.cases {
                for statement in &case.consequent {
                    collect_hoisted_vars(statement, names);
                }
            }
        }
        _ => {}
    }
}

fn collect_loop_left(left: &ForStatementLeft<'_>, names: &mut Vec<String>) {
    if let ForStatementLeft::VariableDeclaration(decl) = left {
        if decl.kind.is_var() {
            collect_declaration(decl, names);
        }
    }
}

fn collect_declaration(decl: &VariableDeclaration<'_>, names: &mut Vec<String>) {
    for declarator in &decl.declarations {
        collect_pattern(&declarator.id, names);
    }
}

fn collect_pattern(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => push_unique(names, ident.name.as_str()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                collect_pattern(&property.value, names);
            }
            if let Some(rest) = &object.rest {
                collect_pattern(&rest.argument, names);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                collect_pattern(element, names);
            }
            if let Some(rest) = &array.rest {
                collect_pattern(&rest.argument, names);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => collect_pattern(&assign.left, names),
    }
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::InvalidConfig(e.to_string()))
}
