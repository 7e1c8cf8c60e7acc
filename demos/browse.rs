//! Scripted menu-browsing session against the simulated host.
//!
//! Run: cargo run --bin browse
//! Set RUST_LOG=debug to watch the session lifecycle.

use std::rc::Rc;

use log::{info, warn};

use slotui_core::{ClickEvent, Host, Item, OwnerId, Surface};
use slotui_menu::{Menu, MenuBuilder, PAGE_SIZE, PageControls, PagedConfig, paged_menu};
use slotui_sim::SimHost;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let sim = Rc::new(SimHost::new());
    let host: Rc<dyn Host> = sim.clone();
    let owner = sim.connect();

    let relics: Rc<Vec<String>> = Rc::new((1..=99).map(|n| format!("Relic #{n}")).collect());

    // Main menu: two shaped buttons, one row.
    let main = MenuBuilder::new()
        .shape(&["_C_____S_"])
        .register(&host, owner, "Main Menu")?;
    {
        let host = Rc::clone(&host);
        let relics = Rc::clone(&relics);
        let main_handle = main.clone();
        main.set_item_at('C', Item::new('C', "Relic Catalogue"), move |_| {
            open_catalogue(&host, owner, &relics, 1, &main_handle);
        })?;
    }
    main.set_item_at('S', Item::new('S', "Settings"), |_| {})?;

    // Settings menu falls back to the main menu when closed.
    let settings = MenuBuilder::new()
        .slot(0, Item::new('s', "Sound: on"), |_| info!("sound toggled"))
        .fallback(&main)
        .register(&host, owner, "Settings")?;

    info!("opening the main menu");
    main.fire()?;
    sim.tick();
    render(&sim, owner);

    if let Err(err) = main.fire() {
        info!("re-fire rejected while open: {err}");
    }

    info!("clicking the catalogue button");
    sim.click(owner, 1);
    sim.tick();
    render(&sim, owner);

    info!("paging forward twice");
    sim.click(owner, 52);
    sim.tick();
    render(&sim, owner);
    sim.click(owner, 52);
    sim.tick();
    render(&sim, owner);

    info!("inspecting the first relic of the page, then paging back");
    sim.click(owner, 0);
    sim.click(owner, 10);
    sim.tick();
    render(&sim, owner);

    info!("paging back to page 1, then taking the back control to the main menu");
    sim.click(owner, 46);
    sim.tick();
    sim.click(owner, 46);
    sim.tick();
    render(&sim, owner);

    info!("opening the settings menu");
    settings.fire()?;
    sim.tick();
    render(&sim, owner);

    info!("closing settings; the main menu is restored through the fallback");
    sim.close_surface(owner);
    sim.advance(3);
    render(&sim, owner);

    info!("owner disconnects");
    sim.disconnect(owner);
    sim.tick();
    info!(
        "sessions ended: main valid={}, settings valid={}",
        main.is_valid(),
        settings.is_valid()
    );
    Ok(())
}

/// Build and fire one catalogue page. Navigation controls re-enter this
/// function for the neighbouring pages; the back control restores the main
/// menu.
fn open_catalogue(
    host: &Rc<dyn Host>,
    owner: OwnerId,
    relics: &Rc<Vec<String>>,
    page: usize,
    main: &Menu,
) {
    let on_item = {
        let relics = Rc::clone(relics);
        Rc::new(move |click: &mut ClickEvent| {
            let absolute = (page - 1) * PAGE_SIZE + click.slot;
            match relics.get(absolute) {
                Some(relic) => info!("inspecting {relic}"),
                None => warn!("no relic behind slot {}", click.slot),
            }
        })
    };
    let on_next = {
        let host = Rc::clone(host);
        let relics = Rc::clone(relics);
        let main = main.clone();
        Rc::new(move |_: &mut ClickEvent| {
            open_catalogue(&host, owner, &relics, page + 1, &main);
        })
    };
    let on_previous = {
        let host = Rc::clone(host);
        let relics = Rc::clone(relics);
        let main = main.clone();
        Rc::new(move |_: &mut ClickEvent| {
            open_catalogue(&host, owner, &relics, page - 1, &main);
        })
    };
    let on_back = {
        let main = main.clone();
        Rc::new(move |_: &mut ClickEvent| {
            if let Err(err) = main.fire() {
                warn!("main menu refused to fire: {err}");
            }
        })
    };

    let config = PagedConfig {
        title: format!("Relic Catalogue (page {page})"),
        entries: relics.as_ref().clone(),
        display: Box::new(|relic: &String, index| {
            let glyph = char::from(b'a' + (index % 26) as u8);
            Item::new(glyph, relic.clone())
        }),
        page,
        has_back: true,
        controls: PageControls::default(),
        on_item,
        on_next,
        on_previous,
        on_back: Some(on_back),
    };

    match paged_menu(host, owner, config) {
        Ok(menu) => {
            if let Err(err) = menu.fire() {
                warn!("catalogue page {page} refused to fire: {err}");
            }
        }
        Err(err) => warn!("catalogue page {page} could not be built: {err}"),
    }
}

/// Print the owner's current view as a glyph grid.
fn render(sim: &SimHost, owner: OwnerId) {
    match sim.viewing(owner) {
        Some(surface) => print_surface(&surface),
        None => println!("({owner} has nothing open)\n"),
    }
}

fn print_surface(surface: &Surface) {
    println!("= {} =", surface.title());
    for row in surface.items().chunks(9) {
        let line: String = row
            .iter()
            .map(|slot| slot.as_ref().map_or('.', |item| item.glyph))
            .collect();
        println!("|{line}|");
    }
    println!();
}
