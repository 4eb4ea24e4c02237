//! 编译时注册的测试类型
//!
//! 类型名称与临时目录中的文件一一对应：
//! `app/Discoverable/Extending.rs` => `App::Discoverable::Extending`

#![allow(dead_code)]

use discovery_macros::discoverable;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[discoverable(name = "Serializable")]
pub trait Serializable {
    fn serialize(&self) -> String;
}

#[discoverable(name = "ArrayAccess")]
pub trait ArrayAccess {
    fn offset_get(&self, offset: usize) -> Option<u8>;
}

pub mod framework {
    use discovery_macros::discoverable;

    #[discoverable(name = "Framework::ServiceProvider", kind = "abstract")]
    pub struct ServiceProvider {
        pub(crate) booted: bool,
    }

    #[discoverable(name = "Framework::ServiceProvider")]
    impl ServiceProvider {
        pub fn register(&self) {}

        pub(crate) fn boot(&mut self) {
            self.booted = true;
        }
    }
}

pub mod discoverable_types {
    use super::Serializable;
    use discovery_macros::discoverable;

    #[discoverable(name = "App::Discoverable::Traits", kind = "mixin")]
    pub struct Traits;

    #[discoverable(name = "App::Discoverable::Traits")]
    impl Traits {
        pub fn discovered(&self) -> bool {
            true
        }
    }

    #[discoverable(name = "App::Discoverable::ClassUsing", uses("App::Discoverable::Traits"))]
    pub struct ClassUsing;

    #[discoverable(
        name = "App::Discoverable::Extending",
        extends = "Framework::ServiceProvider"
    )]
    pub struct Extending;

    #[discoverable(name = "App::Discoverable::NormalClass")]
    pub struct NormalClass {
        pub foo: String,
        bar: String,
    }

    #[discoverable(name = "App::Discoverable::Implementing")]
    pub struct Implementing;

    #[discoverable(name = "App::Discoverable::Implementing", interface = "Serializable")]
    impl Serializable for Implementing {
        fn serialize(&self) -> String {
            String::new()
        }
    }

    #[discoverable(
        name = "App::Discoverable::AbstractProvider",
        kind = "abstract",
        extends = "Framework::ServiceProvider"
    )]
    pub struct AbstractProvider;

    pub mod subdirectory {
        use super::super::{ArrayAccess, Serializable};
        use discovery_macros::discoverable;

        #[discoverable(
            name = "App::Discoverable::Subdirectory::Traits",
            kind = "mixin",
            uses("App::Discoverable::Traits")
        )]
        pub struct Traits;

        #[discoverable(
            name = "App::Discoverable::Subdirectory::ClassUsing",
            uses("App::Discoverable::Subdirectory::Traits")
        )]
        pub struct ClassUsing;

        #[discoverable(
            name = "App::Discoverable::Subdirectory::Extending",
            extends = "Framework::ServiceProvider"
        )]
        pub struct Extending;

        #[discoverable(name = "App::Discoverable::Subdirectory::NormalClass")]
        pub struct NormalClass {
            pub foo: String,
        }

        #[discoverable(name = "App::Discoverable::Subdirectory::Implementing")]
        pub struct Implementing;

        #[discoverable(
            name = "App::Discoverable::Subdirectory::Implementing",
            interface = "Serializable"
        )]
        impl Serializable for Implementing {
            fn serialize(&self) -> String {
                String::new()
            }
        }

        #[discoverable(
            name = "App::Discoverable::Subdirectory::Implementing",
            interface = "ArrayAccess"
        )]
        impl ArrayAccess for Implementing {
            fn offset_get(&self, _offset: usize) -> Option<u8> {
                None
            }
        }
    }
}

/// 与注册类型对应的项目目录
pub fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in [
        "app/Discoverable/ClassUsing.rs",
        "app/Discoverable/Extending.rs",
        "app/Discoverable/NormalClass.rs",
        "app/Discoverable/Implementing.rs",
        "app/Discoverable/Traits.rs",
        "app/Discoverable/AbstractProvider.rs",
        "app/Discoverable/Unregistered.rs",
        "app/Discoverable/README.md",
        "app/Discoverable/Subdirectory/ClassUsing.rs",
        "app/Discoverable/Subdirectory/Extending.rs",
        "app/Discoverable/Subdirectory/NormalClass.rs",
        "app/Discoverable/Subdirectory/Implementing.rs",
        "app/Discoverable/Subdirectory/Traits.rs",
        "app/Discoverable/Subdirectory/notes.txt",
        "storage/Cache.rs",
    ] {
        touch(dir.path(), file);
    }
    dir
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}
