fn main() {
    slint_build::compile("ui/form_editor.slint").expect("Failed to compile Slint UI");
}
