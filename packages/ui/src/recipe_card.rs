use dioxus::prelude::*;
use store::Recipe;

#[component]
pub fn RecipeCard(
    recipe: Recipe,
    #[props(default)] on_select: EventHandler<String>,
    #[props(default)] on_tag: EventHandler<String>,
) -> Element {
    let id = recipe.id.to_string();
    let date = recipe.date.format("%b %-d, %Y").to_string();

    rsx! {
        article {
            class: "flex flex-col gap-2 p-4 border border-neutral-200 rounded bg-white",
            if let Some(image) = recipe.image.clone() {
                img { class: "w-full h-40 object-cover rounded", src: "{image}", alt: "{recipe.name}" }
            }
            h3 {
                class: "text-lg font-semibold text-neutral-800 cursor-pointer",
                onclick: move |_| on_select.call(id.clone()),
                "{recipe.name}"
            }
            p {
                class: "text-[0.8125rem] text-neutral-600",
                "by {recipe.userid} · {date} · {recipe.likes} likes"
            }
            div {
                class: "flex flex-wrap gap-1",
                for (i, tag) in recipe.tags.iter().enumerate() {
                    button {
                        key: "{i}",
                        class: "px-2 py-0.5 text-xs rounded bg-neutral-100 text-neutral-700",
                        onclick: {
                            let tag = tag.clone();
                            move |_| on_tag.call(tag.clone())
                        },
                        "{tag}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn RecipeGrid(
    recipes: Vec<Recipe>,
    #[props(default)] on_select: EventHandler<String>,
    #[props(default)] on_tag: EventHandler<String>,
) -> Element {
    if recipes.is_empty() {
        return rsx! {
            p { class: "text-neutral-600", "No recipes found." }
        };
    }

    rsx! {
        div {
            class: "grid gap-4 grid-cols-[repeat(auto-fill,minmax(240px,1fr))]",
            for recipe in recipes {
                RecipeCard {
                    key: "{recipe.id}",
                    recipe: recipe.clone(),
                    on_select: on_select,
                    on_tag: on_tag,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{NewRecipe, RecipeId};

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn test_grid_renders_cards() {
        fn app() -> Element {
            let recipes = vec![
                Recipe::from_new(
                    RecipeId::new(),
                    NewRecipe::new("Lentil Soup", "greens").with_tags(["vegan", "soup"]),
                ),
                Recipe::from_new(RecipeId::new(), NewRecipe::new("Crepes", "cakeman")),
            ];
            rsx! { RecipeGrid { recipes } }
        }

        let html = render(app);
        assert!(html.contains("Lentil Soup"));
        assert!(html.contains("by greens"));
        assert!(html.contains("vegan"));
        assert!(html.contains("Crepes"));
    }

    #[test]
    fn test_repeated_tags_survive_rerender() {
        fn app() -> Element {
            let recipe = Recipe::from_new(
                RecipeId::new(),
                NewRecipe::new("Lentil Soup", "greens").with_tags(["vegan", "vegan"]),
            );
            rsx! { RecipeCard { recipe } }
        }

        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dom.mark_dirty(ScopeId::APP);
        dom.render_immediate(&mut dioxus::dioxus_core::NoOpMutations);

        assert_eq!(dioxus_ssr::render(&dom).matches("vegan").count(), 2);
    }

    #[test]
    fn test_empty_grid() {
        fn app() -> Element {
            rsx! { RecipeGrid { recipes: Vec::new() } }
        }

        assert!(render(app).contains("No recipes found."));
    }
}
