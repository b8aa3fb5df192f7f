pub(crate) mod group_card;
pub(crate) mod group_editor;
pub(crate) mod group_icon;
pub(crate) mod ui;
