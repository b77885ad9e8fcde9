#![deny(missing_docs)]

//! # Entity Data Model
//!
//! The read-only metadata model supplied by the hosting framework: entity
//! types with structural and navigation properties, complex types, entity
//! sets and singletons. The crate only ever reads this model; it is rebuilt
//! (or re-borrowed) per document-generation call.

/// The primitive EDM type kinds this crate understands.
///
/// Unmapped kinds (e.g. `Stream`, `Geography`) are still representable so
/// that schema mapping can default them to a generic object instead of
/// erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `Edm.Boolean`.
    Boolean,
    /// `Edm.Byte` (unsigned 8-bit).
    Byte,
    /// `Edm.SByte` (signed 8-bit).
    SByte,
    /// `Edm.Int16`.
    Int16,
    /// `Edm.Int32`.
    Int32,
    /// `Edm.Int64`.
    Int64,
    /// `Edm.Single` (32-bit float).
    Single,
    /// `Edm.Double` (64-bit float).
    Double,
    /// `Edm.Decimal`.
    Decimal,
    /// `Edm.String`.
    String,
    /// `Edm.Date`.
    Date,
    /// `Edm.DateTimeOffset`.
    DateTimeOffset,
    /// `Edm.TimeOfDay`.
    TimeOfDay,
    /// `Edm.Duration`.
    Duration,
    /// `Edm.Guid`.
    Guid,
    /// `Edm.Binary`.
    Binary,
    /// `Edm.Stream` (no schema mapping; defaults to object).
    Stream,
    /// `Edm.Geography` (no schema mapping; defaults to object).
    Geography,
}

/// The kind of a property or parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdmTypeKind {
    /// A primitive EDM type.
    Primitive(PrimitiveKind),
    /// A named complex type declared on the model.
    Complex(String),
    /// A named entity type declared on the model.
    Entity(String),
}

/// A reference to an EDM type, with collection and nullability facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmTypeRef {
    /// The referenced type kind.
    pub kind: EdmTypeKind,
    /// Whether this is a collection of the referenced type.
    pub is_collection: bool,
    /// Whether null is an allowed value.
    pub nullable: bool,
}

impl EdmTypeRef {
    /// A single-valued, non-nullable primitive reference.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        EdmTypeRef {
            kind: EdmTypeKind::Primitive(kind),
            is_collection: false,
            nullable: false,
        }
    }

    /// A single-valued, non-nullable complex-type reference.
    pub fn complex(name: impl Into<String>) -> Self {
        EdmTypeRef {
            kind: EdmTypeKind::Complex(name.into()),
            is_collection: false,
            nullable: false,
        }
    }

    /// A single-valued, non-nullable entity-type reference.
    pub fn entity(name: impl Into<String>) -> Self {
        EdmTypeRef {
            kind: EdmTypeKind::Entity(name.into()),
            is_collection: false,
            nullable: false,
        }
    }

    /// Marks the reference as collection-valued.
    pub fn collection(mut self) -> Self {
        self.is_collection = true;
        self
    }

    /// Marks the reference as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A declared structural (data-carrying) property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralProperty {
    /// Property name.
    pub name: String,
    /// Property type reference.
    pub ty: EdmTypeRef,
}

impl StructuralProperty {
    /// Creates a structural property.
    pub fn new(name: impl Into<String>, ty: EdmTypeRef) -> Self {
        StructuralProperty {
            name: name.into(),
            ty,
        }
    }
}

/// A declared navigation (relationship) property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationProperty {
    /// Property name.
    pub name: String,
    /// Name of the target entity type.
    pub target_type: String,
    /// Whether the relationship is many-valued.
    pub is_collection: bool,
}

impl NavigationProperty {
    /// Creates a single-valued navigation property.
    pub fn new(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        NavigationProperty {
            name: name.into(),
            target_type: target_type.into(),
            is_collection: false,
        }
    }

    /// Marks the navigation property as many-valued.
    pub fn collection(mut self) -> Self {
        self.is_collection = true;
        self
    }
}

/// A declared entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    /// Type name (unqualified).
    pub name: String,
    /// Names of the key properties.
    pub key: Vec<String>,
    /// Declared structural properties.
    pub structural_properties: Vec<StructuralProperty>,
    /// Declared navigation properties.
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    /// Creates an entity type with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        EntityType {
            name: name.into(),
            key: Vec::new(),
            structural_properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// Appends a key property name.
    pub fn with_key(mut self, name: impl Into<String>) -> Self {
        self.key.push(name.into());
        self
    }

    /// Appends a structural property.
    pub fn with_property(mut self, name: impl Into<String>, ty: EdmTypeRef) -> Self {
        self.structural_properties
            .push(StructuralProperty::new(name, ty));
        self
    }

    /// Appends a navigation property.
    pub fn with_navigation(mut self, nav: NavigationProperty) -> Self {
        self.navigation_properties.push(nav);
        self
    }
}

/// A declared complex type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    /// Type name (unqualified).
    pub name: String,
    /// Declared structural properties.
    pub properties: Vec<StructuralProperty>,
}

impl ComplexType {
    /// Creates a complex type with no properties.
    pub fn new(name: impl Into<String>) -> Self {
        ComplexType {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Appends a structural property.
    pub fn with_property(mut self, name: impl Into<String>, ty: EdmTypeRef) -> Self {
        self.properties.push(StructuralProperty::new(name, ty));
        self
    }
}

/// A top-level addressable collection of entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySet {
    /// Entity set name.
    pub name: String,
    /// Name of the element entity type.
    pub entity_type: String,
}

impl EntitySet {
    /// Creates an entity set.
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        EntitySet {
            name: name.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// A top-level addressable single entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Singleton {
    /// Singleton name.
    pub name: String,
    /// Name of the entity type.
    pub entity_type: String,
}

impl Singleton {
    /// Creates a singleton.
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Singleton {
            name: name.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// The Entity Data Model of one OData service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdmModel {
    /// Schema namespace (e.g. `Default.NS`).
    pub namespace: String,
    /// Declared entity types.
    pub entity_types: Vec<EntityType>,
    /// Declared complex types.
    pub complex_types: Vec<ComplexType>,
    /// Declared entity sets.
    pub entity_sets: Vec<EntitySet>,
    /// Declared singletons.
    pub singletons: Vec<Singleton>,
}

impl EdmModel {
    /// Creates an empty model with the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        EdmModel {
            namespace: namespace.into(),
            ..EdmModel::default()
        }
    }

    /// Appends an entity type.
    pub fn with_entity_type(mut self, ty: EntityType) -> Self {
        self.entity_types.push(ty);
        self
    }

    /// Appends a complex type.
    pub fn with_complex_type(mut self, ty: ComplexType) -> Self {
        self.complex_types.push(ty);
        self
    }

    /// Appends an entity set.
    pub fn with_entity_set(mut self, set: EntitySet) -> Self {
        self.entity_sets.push(set);
        self
    }

    /// Appends a singleton.
    pub fn with_singleton(mut self, singleton: Singleton) -> Self {
        self.singletons.push(singleton);
        self
    }

    /// Looks up an entity type by name.
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|t| t.name == name)
    }

    /// Looks up a complex type by name.
    pub fn complex_type(&self, name: &str) -> Option<&ComplexType> {
        self.complex_types.iter().find(|t| t.name == name)
    }

    /// Looks up an entity set by name.
    pub fn entity_set(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets.iter().find(|s| s.name == name)
    }

    /// Looks up a singleton by name.
    pub fn singleton(&self, name: &str) -> Option<&Singleton> {
        self.singletons.iter().find(|s| s.name == name)
    }
}
