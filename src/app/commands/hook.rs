//! Entry snippet that an `init.sh` evaluates to run shinit in the caller's scope.

use crate::adapters::shell_quote;
use crate::domain::ShellKind;

/// Render the hook for `shell`, invoking `program` for the load step.
///
/// The snippet refuses standalone execution and hands a failing status back with
/// `return`, so the caller's shell process is never terminated.
pub fn render(shell: ShellKind, program: &str, strict: bool) -> String {
    let guard = match shell {
        ShellKind::Bash => r#"if [ "${BASH_SOURCE[0]}" = "$0" ]; then"#,
        ShellKind::Zsh => r#"if [[ "${ZSH_EVAL_CONTEXT:-}" != *:file* ]]; then"#,
    };
    let strict_flag = if strict { " --strict" } else { "" };

    format!(
        r#"# shinit {shell} hook: source the file containing this, do not execute it.
{guard}
  printf '%s\n' "shinit: this file must be sourced, not executed" >&2
  exit 1
fi
__shinit_script="$({program} load{strict_flag} --entry "{entry}" \
  --bash-version "${{BASH_VERSION:-}}" --zsh-version "${{ZSH_VERSION:-}}")" || return $?
eval "$__shinit_script"
unset __shinit_script
"#,
        shell = shell.name(),
        guard = guard,
        program = shell_quote(program),
        strict_flag = strict_flag,
        entry = shell.source_path_expr(),
    )
}
