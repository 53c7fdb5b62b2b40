use {
    crate::common::{get_crate_name, Field, RecordArgs, RESERVED_FIELD_NAMES},
    darling::{ast::Data, Error, FromDeriveInput, Result},
    proc_macro2::TokenStream,
    quote::quote,
    syn::DeriveInput,
};

/// Reject declarations the codec cannot express.
fn validate(args: &RecordArgs, fields: &[&Field]) -> Result<()> {
    let mut errors = Error::accumulator();
    if !args.generics.params.is_empty() {
        errors.push(
            Error::custom("`Packable` cannot be derived for generic structs")
                .with_span(&args.generics),
        );
    }
    for field in fields {
        let name = field.name();
        if RESERVED_FIELD_NAMES.contains(&name.as_str()) {
            let error = Error::custom(format!("`{name}` is a reserved record field name"));
            errors.push(match &field.ident {
                Some(ident) => error.with_span(ident),
                None => error,
            });
        }
    }
    errors.finish()
}

pub(crate) fn generate(input: DeriveInput) -> Result<TokenStream> {
    let args = RecordArgs::from_derive_input(&input)?;
    let Data::Struct(fields) = &args.data else {
        return Err(Error::custom("`Packable` can only be derived for structs"));
    };
    let fields = fields.iter().collect::<Vec<_>>();
    validate(&args, &fields)?;

    let crate_name = get_crate_name(&args);
    let ident = &args.ident;
    let vis = &args.vis;
    let idents = fields.iter().map(|field| &field.ident).collect::<Vec<_>>();
    let schemas = fields.iter().map(|field| field.schema()).collect::<Vec<_>>();
    let names = fields.iter().map(|field| field.name()).collect::<Vec<_>>();
    let offset_idents = fields
        .iter()
        .map(|field| field.offset_ident())
        .collect::<Vec<_>>();

    Ok(quote! {
        const _: () = {
            impl #crate_name::Schema for #ident {
                type Value = Self;
                const SIZE: usize = 0 #(+ <#schemas as #crate_name::Schema>::SIZE)*;

                #[inline]
                #[allow(unused_mut, unused_assignments, unused_variables)]
                fn pack_into(buffer: &mut [u8], offset: usize, value: &Self::Value) -> #crate_name::Result<()> {
                    #crate_name::check_range(buffer.len(), offset, <Self as #crate_name::Schema>::SIZE)?;
                    let mut cursor = offset;
                    #(
                        <#schemas as #crate_name::Schema>::pack_into(buffer, cursor, &value.#idents)?;
                        cursor += <#schemas as #crate_name::Schema>::SIZE;
                    )*
                    Ok(())
                }

                #[inline]
                #[allow(unused_mut, unused_assignments, unused_variables)]
                fn unpack_from(buffer: &[u8], offset: usize) -> #crate_name::Result<Self::Value> {
                    #crate_name::check_range(buffer.len(), offset, <Self as #crate_name::Schema>::SIZE)?;
                    let mut cursor = offset;
                    #(
                        let #idents = <#schemas as #crate_name::Schema>::unpack_from(buffer, cursor)?;
                        cursor += <#schemas as #crate_name::Schema>::SIZE;
                    )*
                    Ok(Self { #(#idents),* })
                }
            }

            impl #crate_name::Record for #ident {
                const FIELDS: &'static [#crate_name::FieldInfo] = &#crate_name::__private::layout_fields([
                    #((#names, <#schemas as #crate_name::Schema>::SIZE)),*
                ]);

                #[allow(unused_variables)]
                fn field<'a>(value: &'a Self::Value, name: &str) -> Option<&'a dyn ::core::fmt::Debug> {
                    match name {
                        #(#names => Some(&value.#idents),)*
                        _ => None,
                    }
                }
            }
        };

        #[allow(dead_code)]
        impl #ident {
            #(
                #vis const #offset_idents: usize = #crate_name::__private::offset_of(
                    <Self as #crate_name::Record>::FIELDS,
                    #names,
                );
            )*
        }
    })
}
