table_row! {
    /// `Types`: registers a type identifier under a kind.
    TypeRow => Types {
        ty: String => "Type",
        kind: String => "Kind",
    }
}

table_row! {
    /// `Tags`: declares a tag and its category.
    TagRow => Tags {
        tag: String => "Tag",
        category: String => "Category",
    }
}

table_row! {
    /// `TypeTags`: attaches a tag to a type.
    TypeTagRow => TypeTags {
        ty: String => "Type",
        tag: String => "Tag",
    }
}

table_row! {
    /// `Traits`.
    TraitRow => Traits {
        trait_type: String => "TraitType",
        name: String => "Name",
        description: String => "Description",
        internal_only: bool => "InternalOnly",
    }
}

table_row! {
    /// `TraitModifiers`: links a modifier to a trait.
    TraitModifierRow => TraitModifiers {
        trait_type: String => "TraitType",
        modifier_id: String => "ModifierId",
    }
}

impl TypeRow {
    /// A `Types` row for `ty` under `kind`.
    pub fn of(ty: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            kind: Some(kind.into()),
        }
    }
}

impl TypeTagRow {
    /// A `TypeTags` row tagging `ty` with `tag`.
    pub fn of(ty: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            tag: Some(tag.into()),
        }
    }
}
