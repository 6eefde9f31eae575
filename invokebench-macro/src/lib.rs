use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{
    Ident, Path, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Top-level input:
///   `reflect!(impl Name { accessor -> Ret, ... });`
/// plus the optional attribute `, crate_path = crate::path2` at the end.
struct Input {
    ty: Type,
    accessors: Vec<(Ident, Type)>,
    crate_path: Path,
}

impl Parse for Input {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let _: Token![impl] = input.parse()?;
        let ty: Type = input.parse()?;
        let content;
        let _brace = syn::braced!(content in input);
        let mut accessors = Vec::new();

        while !content.is_empty() {
            let id: Ident = content.parse()?;
            let _: Token![->] = content.parse()?;
            let ret: Type = content.parse()?;
            let _: Option<Token![,]> = content.parse()?;

            if accessors.iter().any(|(other, _): &(Ident, Type)| *other == id) {
                return Err(syn::Error::new(id.span(), "duplicate accessor"));
            }

            accessors.push((id, ret));
        }

        let CratePathArg { path: crate_path } = input.parse()?;

        Ok(Input {
            ty,
            accessors,
            crate_path,
        })
    }
}

struct CratePathArg {
    path: Path,
}

impl Parse for CratePathArg {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        // optional trailing comma
        let _: Option<Token![,]> = input.parse()?;

        if input.is_empty() {
            return Ok(CratePathArg::default());
        }

        // expect `crate_path = <path>`
        let ident: Ident = input.parse()?;

        if ident != "crate_path" {
            return Err(syn::Error::new(
                ident.span(),
                "expected `crate_path = <path>`",
            ));
        }

        let _: Token![=] = input.parse()?;
        let path = input.parse()?;
        let _: Option<Token![,]> = input.parse()?;

        Ok(CratePathArg { path })
    }
}

impl Default for CratePathArg {
    fn default() -> Self {
        Self {
            path: Ident::new("invokebench", Span::call_site()).into(),
        }
    }
}

/// Registers accessors of a type so they can be resolved by name at runtime.
///
/// Every accessor must be an inherent method `fn accessor(&self) -> &Ret`
/// where `Ret: 'static`. The generated table is a plain `static`, so lookups
/// never depend on load-time initialization order.
///
/// # Example
/// ```ignore
/// struct Person { name: String }
///
/// impl Person {
///     fn name(&self) -> &String { &self.name }
/// }
///
/// reflect!(impl Person { name -> String });
/// ```
///
/// # Example reexport the invokebench crate.
/// ```ignore
/// reflect!(impl Person { name -> String }, crate_path = my_renamed);
/// ```
#[proc_macro]
pub fn reflect(input: TokenStream) -> TokenStream {
    let Input {
        ty,
        accessors,
        crate_path,
    } = parse_macro_input!(input as Input);

    let ib = crate_path;
    let len = accessors.len();

    let items = accessors.iter().map(|(id, ret)| {
        let getter = format_ident!("__{}_GETTER", id.to_string().to_uppercase());
        let thunk = format_ident!("__reflect_{}", id);

        quote! {
            #[allow(non_upper_case_globals)]
            static #getter: #ib::Getter<#ty, #ret> = <#ty>::#id;

            fn #thunk(
                recv: &dyn ::std::any::Any,
            ) -> ::std::result::Result<&dyn ::std::any::Any, #ib::InvokeError> {
                match recv.downcast_ref::<#ty>() {
                    ::std::option::Option::Some(recv) => {
                        ::std::result::Result::Ok(<#ty>::#id(recv) as &dyn ::std::any::Any)
                    }
                    ::std::option::Option::None => {
                        ::std::result::Result::Err(#ib::InvokeError::IllegalArgument {
                            method: ::std::stringify!(#id),
                            expected: ::std::any::type_name::<#ty>(),
                        })
                    }
                }
            }
        }
    });

    let defs = accessors.iter().map(|(id, _)| {
        let getter = format_ident!("__{}_GETTER", id.to_string().to_uppercase());
        let thunk = format_ident!("__reflect_{}", id);

        quote! {
            #ib::MethodDef::new(::std::stringify!(#id), #thunk, &#getter)
        }
    });

    quote! {
        impl #ib::Reflect for #ty {
            #[inline]
            fn methods() -> &'static [#ib::MethodDef] {
                #( #items )*

                static METHODS: [#ib::MethodDef; #len] = [ #( #defs ),* ];
                &METHODS
            }
        }
    }
    .into()
}
