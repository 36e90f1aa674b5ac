//! Declared-type registry: extension to type, and type to parent type.

use fnv::FnvHashMap;

use crate::hierarchy::TypeHierarchy;

// ---------------------------------------------------------------------------
// Default extension tables
// ---------------------------------------------------------------------------

pub const TEXTURE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "webp", "svg", "bmp", "tga", "exr", "hdr", "ktx", "dds",
];

pub const SCRIPT_EXTENSIONS: &[&str] = &["gd", "cs", "rs", "py", "lua"];

pub const SCENE_EXTENSIONS: &[&str] = &["tscn", "scn"];

pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac"];

pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "json", "cfg", "csv"];

pub const MESH_EXTENSIONS: &[&str] = &["gltf", "glb", "obj", "fbx", "blend"];

/// Default `type -> parent` edges.
const DEFAULT_PARENTS: &[(&str, &str)] = &[
    ("Texture2D", "Texture"),
    ("Texture", "Resource"),
    ("Script", "Resource"),
    ("PackedScene", "Resource"),
    ("AudioStream", "Resource"),
    ("TextFile", "Resource"),
    ("Mesh", "Resource"),
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps file extensions to declared types and declared types to parents.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    extensions: FnvHashMap<String, String>,
    parents: FnvHashMap<String, String>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in resource types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let groups: [(&[&str], &str); 6] = [
            (TEXTURE_EXTENSIONS, "Texture2D"),
            (SCRIPT_EXTENSIONS, "Script"),
            (SCENE_EXTENSIONS, "PackedScene"),
            (AUDIO_EXTENSIONS, "AudioStream"),
            (TEXT_EXTENSIONS, "TextFile"),
            (MESH_EXTENSIONS, "Mesh"),
        ];
        for (extensions, declared_type) in groups {
            for extension in extensions {
                registry.register_extension(extension, declared_type);
            }
        }
        for (child, parent) in DEFAULT_PARENTS {
            registry.register_parent(child, parent);
        }
        registry
    }

    /// Registers an extension (case-insensitive, without the dot).
    pub fn register_extension(&mut self, extension: &str, declared_type: &str) {
        self.extensions.insert(
            extension.trim_start_matches('.').to_ascii_lowercase(),
            declared_type.to_string(),
        );
    }

    pub fn register_parent(&mut self, type_name: &str, parent: &str) {
        self.parents
            .insert(type_name.to_string(), parent.to_string());
    }

    /// Returns the declared type for a file name, based on its extension.
    pub fn declared_type_for_name(&self, name: &str) -> Option<&str> {
        let extension = extension_of_name(name)?;
        self.extensions.get(&extension).map(String::as_str)
    }
}

impl TypeHierarchy for TypeRegistry {
    fn parent_type(&self, type_name: &str) -> Option<String> {
        self.parents.get(type_name).cloned()
    }
}

/// Extracts the lowercase extension from a file name.
pub fn extension_of_name(name: &str) -> Option<String> {
    let split = name.rfind('.')?;
    if split == 0 || split + 1 >= name.len() {
        return None;
    }
    Some(name[split + 1..].to_ascii_lowercase())
}
