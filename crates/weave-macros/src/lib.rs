use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Index, Type};

/// Slot-bearing field types recognised without an attribute.
const SLOT_TYPES: &[&str] = &["State", "ViewModel"];

fn is_slot_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| SLOT_TYPES.iter().any(|name| segment.ident == *name))
            .unwrap_or(false),
        Type::Group(group) => is_slot_type(&group.elem),
        Type::Paren(paren) => is_slot_type(&paren.elem),
        _ => false,
    }
}

fn has_slot_attr(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("slot"))
}

/// Derives `weave_core::Slots`.
///
/// Fields of type `State<_>` or `ViewModel<_>`, and fields marked `#[slot]`, are
/// linked in declaration order. Any other field is ignored. Reordering slot
/// fields changes which stored value each one reads.
#[proc_macro_derive(Slots, attributes(slot))]
pub fn derive_slots(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return syn::Error::new_spanned(&input.ident, "Slots can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let accessors: Vec<TokenStream2> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter(|field| is_slot_type(&field.ty) || has_slot_attr(field))
            .filter_map(|field| field.ident.as_ref())
            .map(|ident| quote! { #ident })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .filter(|(_, field)| is_slot_type(&field.ty) || has_slot_attr(field))
            .map(|(index, _)| {
                let index = Index::from(index);
                quote! { #index }
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let count = accessors.len();
    let expanded = quote! {
        impl #impl_generics weave_core::Slots for #name #ty_generics #where_clause {
            const SLOT_COUNT: usize = #count;

            #[allow(unused_variables)]
            fn link_slots(&self, linker: &mut weave_core::SlotLinker<'_>) {
                #( weave_core::Linkable::link(&self.#accessors, linker); )*
            }
        }
    };
    expanded.into()
}
