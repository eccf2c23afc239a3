//! Property tests for flow invariants.
//!
//! Uses proptest to verify:
//! 1. Exactly one screen is active after any sequence of navigations
//! 2. Wizards keep exactly one active step and only move to neighbours
//! 3. A screen that was left never receives its scheduled work
//! 4. The unread badge matches the unread items
//! 5. A service is selected exactly when it was clicked an odd number of times
//! 6. Malformed credentials never leave the login screen

use proptest::prelude::*;
use micare_core::certification::CertStep;
use micare_core::notifications::NotificationCenter;
use micare_core::personal::PersonalStep;
use micare_core::session::SERVICE_CATALOG;
use micare_core::wizard::{StepWizard, WizardStep};
use micare_core::{AppConfig, Flow, Screen};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_screen() -> impl Strategy<Value = Screen> {
    prop::sample::select(Screen::ALL.to_vec())
}

fn arb_moves() -> impl Strategy<Value = Vec<(u8, u8, bool)>> {
    prop::collection::vec((1u8..=6, 0u8..=7, any::<bool>()), 0..40)
}

/// Username/PIN pairs that must be rejected: empty name or PIN not six chars.
fn arb_bad_credentials() -> impl Strategy<Value = (String, String)> {
    ("[a-z]{0,8}", "\\PC{0,12}").prop_filter("credentials must be invalid", |(user, pin)| {
        user.is_empty() || pin.chars().count() != 6
    })
}

// ── 1. Exclusive Screens ─────────────────────────────────────────────

proptest! {
    /// Whatever is shown, exactly one screen is active and it is the last one.
    #[test]
    fn exactly_one_screen_active(screens in prop::collection::vec(arb_screen(), 1..30)) {
        let mut flow = Flow::new(&AppConfig::default());
        for screen in &screens {
            flow.show(*screen);
            prop_assert_eq!(flow.router().active_screens(), vec![*screen]);
        }
        prop_assert_eq!(flow.current_screen(), *screens.last().unwrap());
    }
}

// ── 2. Wizard Adjacency ──────────────────────────────────────────────

fn check_wizard<S: WizardStep>(moves: &[(u8, u8, bool)]) -> Result<(), TestCaseError> {
    let mut wizard: StepWizard<S> = StepWizard::new();
    for &(from_key, to, forward) in moves {
        let Some(from) = S::from_key(from_key) else {
            continue;
        };
        let before = wizard.position();
        let result = if forward {
            wizard.advance(from, to)
        } else {
            wizard.retreat(from, to)
        };
        let after = wizard.position();
        match result {
            Ok(step) => {
                prop_assert_eq!(step, wizard.active());
                prop_assert_eq!(before.abs_diff(after), 1);
            }
            Err(_) => prop_assert_eq!(before, after),
        }
        prop_assert!(after < wizard.len());
    }
    Ok(())
}

proptest! {
    #[test]
    fn personal_wizard_moves_by_one(moves in arb_moves()) {
        check_wizard::<PersonalStep>(&moves)?;
    }

    #[test]
    fn cert_wizard_moves_by_one(moves in arb_moves()) {
        check_wizard::<CertStep>(&moves)?;
    }
}

// ── 3. Stale Work Is Dropped ─────────────────────────────────────────

proptest! {
    /// Leaving the validation screen at any point freezes its progress.
    #[test]
    fn validation_frozen_after_leaving(leave_at in 0u64..9000) {
        let mut flow = Flow::new(&AppConfig::default());
        flow.show(Screen::Submission);
        flow.set_terms_accepted(true);
        flow.submit_application().unwrap();

        flow.tick(leave_at);
        let visited = flow.validation().visited().to_vec();
        let outcome = flow.validation().outcome();
        flow.show(Screen::Dashboard);
        flow.tick(leave_at + 20_000);

        prop_assert_eq!(flow.validation().visited(), visited.as_slice());
        prop_assert_eq!(flow.validation().outcome(), outcome);
        prop_assert_eq!(flow.pending_tasks_for(Screen::Validation), 0);
    }

    /// Ticking in small or large increments reaches the same state.
    #[test]
    fn tick_granularity_does_not_matter(step in 1u64..3000) {
        let mut coarse = Flow::new(&AppConfig::default());
        let mut fine = Flow::new(&AppConfig::default());
        for flow in [&mut coarse, &mut fine] {
            flow.show(Screen::Submission);
            flow.set_terms_accepted(true);
            flow.submit_application().unwrap();
        }

        coarse.tick(9000);
        let mut now = 0;
        while now < 9000 {
            now = (now + step).min(9000);
            fine.tick(now);
        }

        prop_assert_eq!(coarse.validation().visited(), fine.validation().visited());
        prop_assert_eq!(coarse.validation().outcome(), fine.validation().outcome());
    }
}

// ── 4. Notification Badge ────────────────────────────────────────────

proptest! {
    #[test]
    fn badge_tracks_unread(opens in 0usize..3) {
        let mut center = NotificationCenter::seeded();
        for _ in 0..opens {
            center.open();
            center.close();
        }
        let unread = center.items().iter().filter(|n| !n.read).count();
        prop_assert_eq!(center.unread_count(), unread);
        if unread == 0 {
            prop_assert_eq!(center.badge(), "");
        } else {
            prop_assert_eq!(center.badge(), unread.to_string());
        }
    }
}

// ── 5. Toggle Parity ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn service_selected_after_odd_clicks(
        clicks in prop::collection::vec(0..SERVICE_CATALOG.len(), 0..50),
    ) {
        let mut flow = Flow::new(&AppConfig::default());
        flow.show(Screen::Services);
        let mut counts = [0usize; SERVICE_CATALOG.len()];
        for &idx in &clicks {
            let now_selected = flow.toggle_service(SERVICE_CATALOG[idx].id).unwrap();
            counts[idx] += 1;
            prop_assert_eq!(now_selected, counts[idx] % 2 == 1);
        }
        for (service, count) in SERVICE_CATALOG.iter().zip(counts) {
            prop_assert_eq!(flow.session().is_service_selected(service.id), count % 2 == 1);
        }
        let selected = counts.iter().filter(|c| *c % 2 == 1).count();
        prop_assert_eq!(flow.session().selected_services.len(), selected);
    }
}

// ── 6. Login Rejection ───────────────────────────────────────────────

proptest! {
    #[test]
    fn bad_credentials_stay_on_login((username, pin) in arb_bad_credentials()) {
        let mut flow = Flow::new(&AppConfig::default());
        flow.skip_splash();
        prop_assert!(flow.submit_login(&username, &pin).is_err());
        prop_assert_eq!(flow.pending_tasks_for(Screen::Login), 0);

        flow.tick(60_000);
        prop_assert_eq!(flow.current_screen(), Screen::Login);
        prop_assert!(!flow.session().is_authenticated());
        prop_assert!(!flow.login().loading);
    }
}
