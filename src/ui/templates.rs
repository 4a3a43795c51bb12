//! Page templates

use crate::error::Result;
use minijinja::Environment;

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Stackpad{% endblock %}</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
    <div class="flex h-screen flex-col items-center justify-center gap-4 px-4">
{% block content %}{% endblock %}
    </div>
</body>
</html>
"#;

const LOGIN_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Sign In - Stackpad{% endblock %}
{% block content %}
        <div class="w-full max-w-md space-y-6 rounded-lg border border-gray-700 bg-gray-800 p-8">
            <h1 class="text-center text-2xl font-bold">Sign In</h1>

            <form id="auth-form" class="space-y-4">
                <div class="space-y-2">
                    <label for="email" class="block text-sm font-medium">Email</label>
                    <input id="email" name="email" type="email" required placeholder="you@example.com"
                        class="w-full rounded-md border border-gray-600 bg-gray-700 px-3 py-2 text-sm placeholder-gray-400 focus:outline-none focus:border-blue-500" />
                </div>

                <div class="space-y-2">
                    <label for="password" class="block text-sm font-medium">Password</label>
                    <input id="password" name="password" type="password" required placeholder="••••••••"
                        class="w-full rounded-md border border-gray-600 bg-gray-700 px-3 py-2 text-sm placeholder-gray-400 focus:outline-none focus:border-blue-500" />
                </div>

                <div id="form-error" class="hidden rounded-md bg-red-900/40 p-3 text-sm text-red-300"></div>

                <button type="submit" id="submit-btn"
                    class="w-full rounded-md bg-blue-600 px-4 py-2 font-medium hover:bg-blue-700 disabled:opacity-50">
                    Sign In
                </button>
            </form>

            <div class="text-center text-sm text-gray-400">
                Don't have an account?
                <a href="/signup" class="text-blue-400 hover:underline">Sign up</a>
            </div>
        </div>

        <script>
            document.getElementById('auth-form').addEventListener('submit', async (e) => {
                e.preventDefault();
                const form = e.target;
                const button = document.getElementById('submit-btn');
                const errorBox = document.getElementById('form-error');
                errorBox.classList.add('hidden');
                button.disabled = true;
                button.textContent = 'Signing in...';

                try {
                    const res = await fetch('/api/auth/sign-in/email', {
                        method: 'POST',
                        headers: { 'Content-Type': 'application/json' },
                        body: JSON.stringify({
                            email: form.email.value,
                            password: form.password.value,
                        }),
                    });

                    if (res.ok) {
                        window.location.href = '/dashboard';
                    } else {
                        const err = await res.json();
                        errorBox.textContent = err.message || 'Failed to sign in';
                        errorBox.classList.remove('hidden');
                    }
                } catch (err) {
                    errorBox.textContent = 'An unexpected error occurred';
                    errorBox.classList.remove('hidden');
                } finally {
                    button.disabled = false;
                    button.textContent = 'Sign In';
                }
            });
        </script>
{% endblock %}
"#;

const SIGNUP_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Sign Up - Stackpad{% endblock %}
{% block content %}
        <div class="w-full max-w-md space-y-6 rounded-lg border border-gray-700 bg-gray-800 p-8">
            <h1 class="text-center text-2xl font-bold">Sign Up</h1>

            <form id="auth-form" class="space-y-4">
                <div class="space-y-2">
                    <label for="name" class="block text-sm font-medium">Name</label>
                    <input id="name" name="name" type="text" required placeholder="John Doe"
                        class="w-full rounded-md border border-gray-600 bg-gray-700 px-3 py-2 text-sm placeholder-gray-400 focus:outline-none focus:border-blue-500" />
                </div>

                <div class="space-y-2">
                    <label for="email" class="block text-sm font-medium">Email</label>
                    <input id="email" name="email" type="email" required placeholder="you@example.com"
                        class="w-full rounded-md border border-gray-600 bg-gray-700 px-3 py-2 text-sm placeholder-gray-400 focus:outline-none focus:border-blue-500" />
                </div>

                <div class="space-y-2">
                    <label for="password" class="block text-sm font-medium">Password</label>
                    <input id="password" name="password" type="password" required minlength="8" placeholder="••••••••"
                        class="w-full rounded-md border border-gray-600 bg-gray-700 px-3 py-2 text-sm placeholder-gray-400 focus:outline-none focus:border-blue-500" />
                </div>

                <div id="form-error" class="hidden rounded-md bg-red-900/40 p-3 text-sm text-red-300"></div>

                <button type="submit" id="submit-btn"
                    class="w-full rounded-md bg-blue-600 px-4 py-2 font-medium hover:bg-blue-700 disabled:opacity-50">
                    Sign Up
                </button>
            </form>

            <div class="text-center text-sm text-gray-400">
                Already have an account?
                <a href="/login" class="text-blue-400 hover:underline">Sign in</a>
            </div>
        </div>

        <script>
            document.getElementById('auth-form').addEventListener('submit', async (e) => {
                e.preventDefault();
                const form = e.target;
                const button = document.getElementById('submit-btn');
                const errorBox = document.getElementById('form-error');
                errorBox.classList.add('hidden');
                button.disabled = true;
                button.textContent = 'Signing up...';

                try {
                    const res = await fetch('/api/auth/sign-up/email', {
                        method: 'POST',
                        headers: { 'Content-Type': 'application/json' },
                        body: JSON.stringify({
                            name: form.name.value,
                            email: form.email.value,
                            password: form.password.value,
                        }),
                    });

                    if (res.ok) {
                        window.location.href = '/dashboard';
                    } else {
                        const err = await res.json();
                        errorBox.textContent = err.message || 'Failed to sign up';
                        errorBox.classList.remove('hidden');
                    }
                } catch (err) {
                    errorBox.textContent = 'An unexpected error occurred';
                    errorBox.classList.remove('hidden');
                } finally {
                    button.disabled = false;
                    button.textContent = 'Sign Up';
                }
            });
        </script>
{% endblock %}
"#;

const DASHBOARD_TEMPLATE: &str = r#"{% extends "base.html" %}
{% block title %}Dashboard - Stackpad{% endblock %}
{% block content %}
{% if user %}
        <div class="w-full max-w-2xl space-y-6 rounded-lg border border-gray-700 bg-gray-800 p-8">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">Dashboard</h1>
                <button id="sign-out"
                    class="rounded-md border border-gray-600 px-4 py-2 text-sm hover:bg-gray-700">
                    Sign Out
                </button>
            </div>

            <div class="space-y-4">
                <div class="rounded-lg border border-gray-700 p-4">
                    <h2 class="mb-3 text-lg font-semibold">Session Information</h2>
                    <div class="space-y-2 text-sm">
                        <div><strong>Session ID:</strong> {{ session.id }}</div>
                        <div><strong>Expires At:</strong> {{ session.expiresAt }}</div>
                    </div>
                </div>

                <div class="rounded-lg border border-gray-700 p-4">
                    <h2 class="mb-3 text-lg font-semibold">User Information</h2>
                    <div class="space-y-2 text-sm">
                        <div><strong>ID:</strong> {{ user.id }}</div>
                        <div><strong>Name:</strong> {{ user.name }}</div>
                        <div><strong>Email:</strong> {{ user.email }}</div>
                        <div><strong>Email Verified:</strong> {{ "Yes" if user.emailVerified else "No" }}</div>
                        <div><strong>Created At:</strong> {{ user.createdAt }}</div>
                    </div>
                </div>
            </div>
        </div>

        <script>
            document.getElementById('sign-out').addEventListener('click', async () => {
                await fetch('/api/auth/sign-out', { method: 'POST' });
                window.location.href = '/login';
            });
        </script>
{% else %}
        <div class="text-center">
            <h1 class="text-2xl font-bold">Not Authenticated</h1>
            <p class="mt-2 text-gray-400">Please sign in to access the dashboard.</p>
            <a href="/login"
                class="mt-4 inline-block rounded-md bg-blue-600 px-4 py-2 font-medium hover:bg-blue-700">
                Go to Sign In
            </a>
        </div>
{% endif %}
{% endblock %}
"#;

/// Build the template environment with all pages registered
pub fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("base.html", BASE_TEMPLATE)?;
    env.add_template("login.html", LOGIN_TEMPLATE)?;
    env.add_template("signup.html", SIGNUP_TEMPLATE)?;
    env.add_template("dashboard.html", DASHBOARD_TEMPLATE)?;
    Ok(env)
}
