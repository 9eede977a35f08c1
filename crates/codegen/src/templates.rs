/// Command printed in every generated header
pub static REGENERATE_COMMAND: &str = "gems-gen --orm-dir <dir> --forms-dir <dir>";

/// Header of a generated file for `tree` (`orm` or `forms`)
pub fn header(tree: &str) -> String {
    format!(
        "// Code generated by gems-gen for the {} tree. DO NOT EDIT.\n// Regenerate with `{}`.\n\n",
        tree, REGENERATE_COMMAND
    )
}
