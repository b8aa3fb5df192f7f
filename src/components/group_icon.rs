use icons::{
    BookOpen as BookOpenIcon, Bookmark as BookmarkIcon, Briefcase as BriefcaseIcon,
    Calendar as CalendarIcon, Camera as CameraIcon, Cloud as CloudIcon, Code as CodeIcon,
    Coffee as CoffeeIcon, Folder as FolderIcon, Gamepad2 as Gamepad2Icon, Globe as GlobeIcon,
    GraduationCap as GraduationCapIcon, Heart as HeartIcon, Link as LinkIcon, Mail as MailIcon,
    Music as MusicIcon, Newspaper as NewspaperIcon, ShoppingCart as ShoppingCartIcon,
    Star as StarIcon, Terminal as TerminalIcon, Video as VideoIcon, Wrench as WrenchIcon,
};
use leptos::prelude::*;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Icons a link group can carry. Stored by name in page documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumString, EnumIter)]
pub(crate) enum GroupIcon {
    #[default]
    Link,
    Code,
    Globe,
    Folder,
    Star,
    Heart,
    BookOpen,
    Briefcase,
    Music,
    Video,
    ShoppingCart,
    Newspaper,
    Mail,
    Calendar,
    Camera,
    Coffee,
    Terminal,
    Cloud,
    Bookmark,
    Wrench,
    GraduationCap,
    Gamepad2,
}

impl GroupIcon {
    /// Unknown or empty names resolve to [`GroupIcon::Link`].
    pub fn from_name(name: &str) -> Self {
        GroupIcon::from_str(name.trim()).unwrap_or_default()
    }

    pub fn all() -> Vec<GroupIcon> {
        GroupIcon::iter().collect()
    }
}

#[component]
pub fn GroupIconView(
    #[prop(into)] name: String,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let class = if class.is_empty() {
        "size-5".to_string()
    } else {
        class
    };

    match GroupIcon::from_name(&name) {
        GroupIcon::Link => view! { <LinkIcon class=class /> }.into_any(),
        GroupIcon::Code => view! { <CodeIcon class=class /> }.into_any(),
        GroupIcon::Globe => view! { <GlobeIcon class=class /> }.into_any(),
        GroupIcon::Folder => view! { <FolderIcon class=class /> }.into_any(),
        GroupIcon::Star => view! { <StarIcon class=class /> }.into_any(),
        GroupIcon::Heart => view! { <HeartIcon class=class /> }.into_any(),
        GroupIcon::BookOpen => view! { <BookOpenIcon class=class /> }.into_any(),
        GroupIcon::Briefcase => view! { <BriefcaseIcon class=class /> }.into_any(),
        GroupIcon::Music => view! { <MusicIcon class=class /> }.into_any(),
        GroupIcon::Video => view! { <VideoIcon class=class /> }.into_any(),
        GroupIcon::ShoppingCart => view! { <ShoppingCartIcon class=class /> }.into_any(),
        GroupIcon::Newspaper => view! { <NewspaperIcon class=class /> }.into_any(),
        GroupIcon::Mail => view! { <MailIcon class=class /> }.into_any(),
        GroupIcon::Calendar => view! { <CalendarIcon class=class /> }.into_any(),
        GroupIcon::Camera => view! { <CameraIcon class=class /> }.into_any(),
        GroupIcon::Coffee => view! { <CoffeeIcon class=class /> }.into_any(),
        GroupIcon::Terminal => view! { <TerminalIcon class=class /> }.into_any(),
        GroupIcon::Cloud => view! { <CloudIcon class=class /> }.into_any(),
        GroupIcon::Bookmark => view! { <BookmarkIcon class=class /> }.into_any(),
        GroupIcon::Wrench => view! { <WrenchIcon class=class /> }.into_any(),
        GroupIcon::GraduationCap => view! { <GraduationCapIcon class=class /> }.into_any(),
        GroupIcon::Gamepad2 => view! { <Gamepad2Icon class=class /> }.into_any(),
    }
}
