use super::RecordId;

/// Option record of a dropdown: something with an id and a label.
pub trait SelectOption: Clone + PartialEq + 'static {
    fn option_id(&self) -> RecordId;

    fn option_label(&self) -> String;
}

/// Looks up the option with the given id in a loaded option list
pub fn find_option<T: SelectOption>(options: &[T], id: RecordId) -> Option<&T> {
    options.iter().find(|o| o.option_id() == id)
}
