use {
    darling::{ast::Data, FromDeriveInput, FromField},
    quote::format_ident,
    syn::{ext::IdentExt, parse_quote, Generics, Ident, Path, Type, Visibility},
};

/// Field names that cannot be declared on a record.
pub(crate) const RESERVED_FIELD_NAMES: [&str; 2] = ["size", "members"];

#[derive(FromField)]
#[darling(attributes(cstruct))]
pub(crate) struct Field {
    pub(crate) ident: Option<Ident>,
    pub(crate) ty: Type,
    /// Schema used to pack the field instead of its own type.
    #[darling(default)]
    pub(crate) with: Option<Type>,
}

impl Field {
    /// The schema this field is packed with.
    pub(crate) fn schema(&self) -> &Type {
        self.with.as_ref().unwrap_or(&self.ty)
    }

    /// Field name without a raw identifier prefix.
    pub(crate) fn name(&self) -> String {
        self.ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default()
    }

    /// Name of the generated offset constant, `FOO_OFFSET` for field `foo`.
    pub(crate) fn offset_ident(&self) -> Ident {
        format_ident!("{}_OFFSET", self.name().to_uppercase())
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(cstruct), supports(struct_named))]
pub(crate) struct RecordArgs {
    pub(crate) ident: Ident,
    pub(crate) vis: Visibility,
    pub(crate) generics: Generics,
    pub(crate) data: Data<(), Field>,
    /// Path to the `cstruct` crate, for re-exporting crates.
    #[darling(default, rename = "crate")]
    pub(crate) crate_path: Option<Path>,
}

pub(crate) fn get_crate_name(args: &RecordArgs) -> Path {
    args.crate_path
        .clone()
        .unwrap_or_else(|| parse_quote!(::cstruct))
}
